use crate::api::BookApi;
use crate::book::Book;
use crate::form::validate::validate_book_form;
use crate::form::{BookField, BookForm, ChangeOutcome, FieldErrors};
use crate::workflow::{Banner, Clock};
use tracing::{error, info};

pub const CREATED_MESSAGE: &str = "Book added successfully!";
pub const CREATE_FAILED_MESSAGE: &str = "Failed to add book.";

/// 도서 등록 화면
///
/// 수정 화면과 같은 입력 처리와 검사 규칙을 사용하며 빈 폼에서 시작한다.
pub struct CreateBookPage<'a, A: BookApi + ?Sized> {
    api: &'a A,
    form: BookForm,
    errors: FieldErrors,
    banner: Option<Banner>,
}

impl<'a, A: BookApi + ?Sized> CreateBookPage<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self {
            api,
            form: BookForm::default(),
            errors: FieldErrors::new(),
            banner: None,
        }
    }

    pub fn form(&self) -> &BookForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn change(&mut self, field: BookField, raw: &str, clock: &dyn Clock) -> ChangeOutcome {
        self.form.apply_change(field, raw, clock.current_year())
    }

    /// 검사를 통과하면 등록 요청을 보내고 서버가 돌려준 도서를 반환한다.
    pub fn submit(&mut self, clock: &dyn Clock) -> Option<Book> {
        self.errors.clear();
        self.banner = None;

        let book = validate_book_form(&self.form, clock.current_year())
            .and_then(|_| self.form.to_book(None));
        let book = match book {
            Ok(book) => book,
            Err(errors) => {
                self.errors = errors;
                return None;
            }
        };

        match self.api.create_book(&book) {
            Ok(created) => {
                info!("book created: {:?}", created.id);
                self.banner = Some(Banner::success(CREATED_MESSAGE));
                self.form = BookForm::default();
                Some(created)
            }
            Err(e) => {
                error!("BOOK: {}, ERROR: {}", book.name, e);
                self.banner = Some(Banner::failure(CREATE_FAILED_MESSAGE));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::workflow::fake::FixedClock;

    const CLOCK: FixedClock = FixedClock(2026);

    fn fill<A: BookApi>(page: &mut CreateBookPage<'_, A>) {
        page.change(BookField::Name, "The Hobbit", &CLOCK);
        page.change(BookField::Genre, "Fantasy", &CLOCK);
        page.change(BookField::Author, "J. R. R. Tolkien", &CLOCK);
        page.change(BookField::Year, "1937", &CLOCK);
        page.change(BookField::Description, "There and back again", &CLOCK);
        page.change(BookField::Price, "10.99", &CLOCK);
    }

    #[test]
    fn creates_book_and_resets_form() {
        let api = FakeApi::default();
        let mut page = CreateBookPage::new(&api);
        fill(&mut page);

        let created = page.submit(&CLOCK).unwrap();

        assert!(created.id.is_some());
        assert_eq!(created.name, "The Hobbit");
        assert_eq!(page.banner().map(Banner::text), Some(CREATED_MESSAGE));
        assert_eq!(page.form(), &BookForm::default());
        assert_eq!(api.created.borrow().len(), 1);
    }

    #[test]
    fn failed_create_keeps_form() {
        let api = FakeApi { fail_writes: true, ..FakeApi::default() };
        let mut page = CreateBookPage::new(&api);
        fill(&mut page);
        let before = page.form().clone();

        assert!(page.submit(&CLOCK).is_none());
        assert_eq!(page.form(), &before);
        assert_eq!(page.banner().map(Banner::text), Some(CREATE_FAILED_MESSAGE));
    }

    #[test]
    fn empty_form_is_not_sent() {
        let api = FakeApi::default();
        let mut page = CreateBookPage::new(&api);

        assert!(page.submit(&CLOCK).is_none());
        assert_eq!(page.errors().len(), 6);
        assert!(api.created.borrow().is_empty());
    }
}
