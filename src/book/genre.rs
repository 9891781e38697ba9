use crate::book::BookError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// 도서 장르
///
/// 서버와 주고 받는 값은 화면에 표시되는 라벨과 동일하다. (예: `"Science Fiction"`)
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
    Mystery,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    Fantasy,
    Romance,
    Thriller,
    Biography,
    History,
    #[serde(rename = "Self-Help")]
    SelfHelp,
}

impl Genre {
    /// 선택 목록에 표시되는 순서 그대로의 전체 장르
    pub const ALL: [Genre; 10] = [
        Genre::Fiction,
        Genre::NonFiction,
        Genre::Mystery,
        Genre::ScienceFiction,
        Genre::Fantasy,
        Genre::Romance,
        Genre::Thriller,
        Genre::Biography,
        Genre::History,
        Genre::SelfHelp,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::NonFiction => "Non-Fiction",
            Genre::Mystery => "Mystery",
            Genre::ScienceFiction => "Science Fiction",
            Genre::Fantasy => "Fantasy",
            Genre::Romance => "Romance",
            Genre::Thriller => "Thriller",
            Genre::Biography => "Biography",
            Genre::History => "History",
            Genre::SelfHelp => "Self-Help",
        }
    }
}

impl FromStr for Genre {
    type Err = BookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL.iter()
            .find(|genre| genre.label() == s)
            .copied()
            .ok_or_else(|| BookError::UnknownGenre(s.to_owned()))
    }
}

impl Display for Genre {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
