use std::fmt::Write;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct NavItem {
    pub title: &'static str,
    pub url: &'static str,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct NavGroup {
    pub title: &'static str,
    pub items: &'static [NavItem],
}

/// 사이드바 메뉴 그룹
pub const NAV_MAIN: &[NavGroup] = &[NavGroup {
    title: "Getting Started",
    items: &[
        NavItem { title: "Home", url: "/" },
        NavItem { title: "Books", url: "/userdashboard" },
    ],
}];

/// 메뉴 마지막에 붙는 로그인 상태 항목
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AuthEntry {
    Logout,
    PleaseLogin { url: &'static str },
}

pub struct Sidebar {
    authenticated: bool,
}

impl Sidebar {
    pub fn new(authenticated: bool) -> Self {
        Self { authenticated }
    }

    pub fn groups(&self) -> &'static [NavGroup] {
        NAV_MAIN
    }

    pub fn auth_entry(&self) -> AuthEntry {
        if self.authenticated {
            AuthEntry::Logout
        } else {
            AuthEntry::PleaseLogin { url: "/" }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for group in self.groups() {
            writeln!(out, "{}", group.title).ok();
            for item in group.items {
                writeln!(out, "  {} ({})", item.title, item.url).ok();
            }
            match self.auth_entry() {
                AuthEntry::Logout => writeln!(out, "  Logout").ok(),
                AuthEntry::PleaseLogin { url } => writeln!(out, "  Please Login ({})", url).ok(),
            };
        }
        out
    }
}
