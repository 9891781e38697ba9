use crate::api::BookApi;
use crate::book::{Book, BookId};
use std::fmt::Write;
use tracing::error;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load books.";

const TITLE: &str = "Available Book List";
const DETAILS_TITLE: &str = "Book Details";
const NOTHING_SELECTED: &str = "Click a book to see details.";
const ADD_TO_CART: &str = "[ Add To Cart ]";
const LOGIN_FIRST: &str = "Login First";

/// 도서 목록과 선택된 도서의 상세 정보를 보여주는 화면
pub struct Dashboard {
    books: Vec<Book>,
    selected: Option<usize>,
    loading: bool,
    error: Option<String>,
    authenticated: bool,
}

impl Dashboard {
    pub fn new(authenticated: bool) -> Self {
        Self {
            books: Vec::new(),
            selected: None,
            loading: true,
            error: None,
            authenticated,
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected(&self) -> Option<&Book> {
        self.selected.and_then(|i| self.books.get(i))
    }

    /// 도서 목록을 불러온다. 실패하면 로그를 남기고 오류 메시지를 설정한다.
    pub fn load(&mut self, api: &dyn BookApi) {
        match api.list_books() {
            Ok(books) => {
                self.books = books;
                self.selected = None;
                self.error = None;
            }
            Err(e) => {
                error!("Error fetching books: {}", e);
                self.error = Some(LOAD_FAILED_MESSAGE.to_owned());
            }
        }
        self.loading = false;
    }

    /// 아이디가 일치하는 도서를 상세 정보 영역에 표시할 도서로 선택한다.
    pub fn select(&mut self, id: &BookId) -> Option<&Book> {
        self.selected = self.books.iter().position(|book| book.id.as_ref() == Some(id));
        self.selected()
    }

    pub fn render_table(&self) -> String {
        let mut out = String::new();
        writeln!(out, "{}", TITLE).ok();
        if let Some(error) = &self.error {
            writeln!(out, "{}", error).ok();
            return out;
        }

        let rows = self.books.iter()
            .map(|book| [
                book.name.clone(),
                book.genre.label().to_owned(),
                book.author.clone(),
                book.display_year(),
                book.display_price(),
            ])
            .collect::<Vec<_>>();

        let header = ["Name", "Genre", "Author", "Year", "Price"].map(str::to_owned);
        let mut widths = header.clone().map(|h| h.chars().count());
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        for row in std::iter::once(&header).chain(&rows) {
            writeln!(
                out,
                "{:<w0$}  {:<w1$}  {:<w2$}  {:<w3$}  {:>w4$}",
                row[0], row[1], row[2], row[3], row[4],
                w0 = widths[0], w1 = widths[1], w2 = widths[2], w3 = widths[3], w4 = widths[4],
            ).ok();
        }
        out
    }

    pub fn render_details(&self) -> String {
        let mut out = String::new();
        writeln!(out, "{}", DETAILS_TITLE).ok();

        let Some(book) = self.selected() else {
            writeln!(out, "{}", NOTHING_SELECTED).ok();
            return out;
        };

        writeln!(out, "Name: {}", book.name).ok();
        writeln!(out, "Genre: {}", book.genre).ok();
        writeln!(out, "Author: {}", book.author).ok();
        writeln!(out, "Description: {}", book.description).ok();
        writeln!(out, "Year: {}", book.display_year()).ok();
        writeln!(out, "Price: {}", book.display_price()).ok();
        if self.authenticated {
            writeln!(out, "{}", ADD_TO_CART).ok();
        } else {
            writeln!(out, "{}", LOGIN_FIRST).ok();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::book::Genre;

    fn book(id: &str, name: &str, year: Option<i32>, price: Option<f64>) -> Book {
        Book {
            id: Some(BookId::parse(id).unwrap()),
            name: name.to_owned(),
            genre: Genre::Mystery,
            author: "Agatha Christie".to_owned(),
            year,
            description: "Whodunit".to_owned(),
            price,
        }
    }

    fn api() -> FakeApi {
        FakeApi {
            books: vec![
                book("1", "Curtain", Some(1975), Some(8.0)),
                book("2", "Endless Night", None, None),
            ],
            ..FakeApi::default()
        }
    }

    #[test]
    fn loads_books_and_stops_loading() {
        let mut dashboard = Dashboard::new(false);
        assert!(dashboard.is_loading());

        dashboard.load(&api());

        assert!(!dashboard.is_loading());
        assert_eq!(dashboard.books().len(), 2);
        assert_eq!(dashboard.error(), None);
    }

    #[test]
    fn load_failure_sets_message() {
        let mut dashboard = Dashboard::new(false);
        dashboard.load(&FakeApi { fail_reads: true, ..FakeApi::default() });

        assert!(!dashboard.is_loading());
        assert_eq!(dashboard.error(), Some(LOAD_FAILED_MESSAGE));
        assert!(dashboard.render_table().contains(LOAD_FAILED_MESSAGE));
    }

    #[test]
    fn table_shows_not_available_for_missing_values() {
        let mut dashboard = Dashboard::new(false);
        dashboard.load(&api());
        let table = dashboard.render_table();
        let lines = table.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "Available Book List");
        assert!(lines[1].starts_with("Name"));
        assert!(lines[2].contains("Curtain") && lines[2].contains("1975") && lines[2].ends_with("$8"));
        assert!(lines[3].contains("Endless Night") && lines[3].ends_with("N/A"));
    }

    #[test]
    fn details_depend_on_selection_and_login() {
        let mut dashboard = Dashboard::new(false);
        dashboard.load(&api());
        assert!(dashboard.render_details().contains("Click a book to see details."));

        let selected = dashboard.select(&BookId::parse("2").unwrap()).map(|b| b.name.clone());
        assert_eq!(selected.as_deref(), Some("Endless Night"));
        assert!(dashboard.render_details().contains("Login First"));

        let mut dashboard = Dashboard::new(true);
        dashboard.load(&api());
        dashboard.select(&BookId::parse("1").unwrap());
        let details = dashboard.render_details();
        assert!(details.contains("Add To Cart"));
        assert!(details.contains("Price: $8"));
    }

    #[test]
    fn selecting_unknown_id_clears_selection() {
        let mut dashboard = Dashboard::new(false);
        dashboard.load(&api());
        dashboard.select(&BookId::parse("1").unwrap());

        assert!(dashboard.select(&BookId::parse("99").unwrap()).is_none());
        assert!(dashboard.selected().is_none());
    }
}
