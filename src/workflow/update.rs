use crate::api::BookApi;
use crate::book::BookId;
use crate::form::validate::validate_book_form;
use crate::form::{BookField, BookForm, ChangeOutcome, FieldErrors};
use crate::workflow::{Banner, Clock, Navigator};
use std::time::Duration;
use tracing::{error, info};

/// 수정 성공 후 이동할 경로
pub const REDIRECT_PATH: &str = "/book";
/// 수정 성공 메시지를 보여준 뒤 이동하기까지의 대기 시간
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

pub const UPDATED_MESSAGE: &str = "Book updated successfully!";
pub const UPDATE_FAILED_MESSAGE: &str = "Failed to update book.";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SubmitOutcome {
    /// 검사에 실패해 요청을 보내지 않음
    Invalid,

    Updated,

    /// 요청이 실패함, 폼의 값은 그대로 유지된다.
    Failed,
}

/// 도서 수정 화면
///
/// 화면이 열리면([`UpdateBookPage::mount`]) 서버의 현재 값으로 폼을 채우고,
/// 제출 시([`UpdateBookPage::submit`]) 검사 후 한번만 수정 요청을 보낸다.
/// 재시도나 동시 수정 충돌 검사는 하지 않는다.
pub struct UpdateBookPage<'a, A: BookApi + ?Sized> {
    api: &'a A,
    id: BookId,
    form: BookForm,
    errors: FieldErrors,
    banner: Option<Banner>,
    loading: bool,
}

impl<'a, A: BookApi + ?Sized> UpdateBookPage<'a, A> {
    pub fn new(api: &'a A, id: BookId) -> Self {
        Self {
            api,
            id,
            form: BookForm::default(),
            errors: FieldErrors::new(),
            banner: None,
            loading: false,
        }
    }

    pub fn id(&self) -> &BookId {
        &self.id
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

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// 현재 도서 정보로 폼을 채운다. 조회 실패는 로그로만 남기고 폼은 비워둔다.
    pub fn mount(&mut self) {
        match self.api.get_book(&self.id) {
            Ok(book) => self.form = BookForm::from(&book),
            Err(e) => error!("Error fetching book: {}, ERROR: {}", self.id, e),
        }
    }

    pub fn change(&mut self, field: BookField, raw: &str, clock: &dyn Clock) -> ChangeOutcome {
        self.form.apply_change(field, raw, clock.current_year())
    }

    pub fn submit(&mut self, clock: &dyn Clock, navigator: &mut dyn Navigator) -> SubmitOutcome {
        self.loading = true;
        self.errors.clear();
        self.banner = None;

        let outcome = self.send(clock, navigator);

        self.loading = false;
        outcome
    }

    fn send(&mut self, clock: &dyn Clock, navigator: &mut dyn Navigator) -> SubmitOutcome {
        let book = validate_book_form(&self.form, clock.current_year())
            .and_then(|_| self.form.to_book(Some(self.id.clone())));
        let book = match book {
            Ok(book) => book,
            Err(errors) => {
                self.errors = errors;
                return SubmitOutcome::Invalid;
            }
        };

        match self.api.update_book(&self.id, &book) {
            Ok(()) => {
                info!("book updated: {}", self.id);
                self.banner = Some(Banner::success(UPDATED_MESSAGE));
                navigator.navigate_after(REDIRECT_PATH, REDIRECT_DELAY);
                SubmitOutcome::Updated
            }
            Err(e) => {
                error!("BOOK: {}, ERROR: {}", self.id, e);
                self.banner = Some(Banner::failure(UPDATE_FAILED_MESSAGE));
                SubmitOutcome::Failed
            }
        }
    }
}
