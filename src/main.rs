use book_heaven::book::BookId;
use book_heaven::config::AppConfig;
use book_heaven::dashboard::Dashboard;
use book_heaven::form::{BookField, ChangeOutcome, FieldErrors, SignupField};
use book_heaven::nav::Sidebar;
use book_heaven::workflow::create::CreateBookPage;
use book_heaven::workflow::signup::SignupPage;
use book_heaven::workflow::update::{SubmitOutcome, UpdateBookPage};
use book_heaven::workflow::{Banner, DeferredNavigator, SystemClock};
use book_heaven::{auth, config, create_client, open_token_store, Error};
use clap::{Args, Parser, Subcommand};
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(name = "book-heaven", version, about = "Browse and manage the Book Heaven bookstore")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 도서 목록 출력
    List,
    /// 도서 상세 정보 출력
    Show { id: String },
    /// 도서 정보 수정, 지정한 필드만 변경된다.
    Update {
        id: String,
        #[command(flatten)]
        fields: BookArgs,
    },
    /// 새 도서 등록
    Add {
        #[command(flatten)]
        fields: BookArgs,
    },
    /// 회원 가입 정보 검사
    Signup {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        password: String,
        #[arg(long, default_value = "")]
        confirm_password: String,
    },
    /// 로그인 토큰 저장
    Login {
        #[arg(long)]
        token: String,
    },
    /// 로그인 토큰 삭제
    Logout,
    /// 사이드바 메뉴 출력
    Sidebar,
}

#[derive(Args)]
struct BookArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    genre: Option<String>,
    #[arg(long)]
    author: Option<String>,
    #[arg(long)]
    year: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    price: Option<String>,
}

impl BookArgs {
    fn changes(&self) -> Vec<(BookField, &str)> {
        [
            (BookField::Name, &self.name),
            (BookField::Genre, &self.genre),
            (BookField::Author, &self.author),
            (BookField::Year, &self.year),
            (BookField::Description, &self.description),
            (BookField::Price, &self.price),
        ]
            .into_iter()
            .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
            .collect()
    }
}

fn main() -> ExitCode {
    config::load_dotenv();
    let cli = Cli::parse();

    let app = match config::load_config() {
        Ok(app) => app,
        Err(e) => {
            eprintln!("{}", Error::from(e));
            return ExitCode::FAILURE;
        }
    };
    let _guard = match config::log::set_global_logging_config(app.log()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command, &app) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, app: &AppConfig) -> Result<bool, Error> {
    let store = open_token_store(app);

    match command {
        Command::List => {
            let client = create_client(app, &store)?;
            let mut dashboard = Dashboard::new(auth::is_authenticated(&store)?);
            dashboard.load(&client);
            print!("{}", dashboard.render_table());
            Ok(dashboard.error().is_none())
        }
        Command::Show { id } => {
            let id = BookId::parse(&id)?;
            let client = create_client(app, &store)?;
            let mut dashboard = Dashboard::new(auth::is_authenticated(&store)?);
            dashboard.load(&client);
            if let Some(error) = dashboard.error() {
                eprintln!("{}", error);
                return Ok(false);
            }
            let found = dashboard.select(&id).is_some();
            print!("{}", dashboard.render_details());
            Ok(found)
        }
        Command::Update { id, fields } => {
            let id = BookId::parse(&id)?;
            let client = create_client(app, &store)?;
            let mut page = UpdateBookPage::new(&client, id);
            page.mount();
            for (field, value) in fields.changes() {
                if page.change(field, value, &SystemClock) == ChangeOutcome::Ignored {
                    eprintln!("ignored {}: {}", field.name(), value);
                }
            }

            let mut navigator = DeferredNavigator::new();
            let outcome = page.submit(&SystemClock, &mut navigator);
            print_result(page.banner(), page.errors());
            if let Some(path) = navigator.follow() {
                println!("-> {}", path);
            }
            Ok(outcome == SubmitOutcome::Updated)
        }
        Command::Add { fields } => {
            let client = create_client(app, &store)?;
            let mut page = CreateBookPage::new(&client);
            for (field, value) in fields.changes() {
                if page.change(field, value, &SystemClock) == ChangeOutcome::Ignored {
                    eprintln!("ignored {}: {}", field.name(), value);
                }
            }

            let created = page.submit(&SystemClock);
            print_result(page.banner(), page.errors());
            if let Some(id) = created.and_then(|book| book.id) {
                println!("id: {}", id);
            }
            Ok(page.banner().is_some_and(Banner::is_success))
        }
        Command::Signup { name, email, address, phone, password, confirm_password } => {
            let mut page = SignupPage::new();
            page.change(SignupField::Name, &name);
            page.change(SignupField::Email, &email);
            page.change(SignupField::Address, &address);
            page.change(SignupField::Phone, &phone);
            page.change(SignupField::Password, &password);
            page.change(SignupField::ConfirmPassword, &confirm_password);

            let accepted = page.submit();
            print_result(page.banner(), page.errors());
            Ok(accepted)
        }
        Command::Login { token } => {
            auth::login(&store, &token)?;
            println!("Logged in");
            Ok(true)
        }
        Command::Logout => {
            auth::logout(&store)?;
            println!("Logged out");
            Ok(true)
        }
        Command::Sidebar => {
            print!("{}", Sidebar::new(auth::is_authenticated(&store)?).render());
            Ok(true)
        }
    }
}

fn print_result(banner: Option<&Banner>, errors: &FieldErrors) {
    if let Some(banner) = banner {
        if banner.is_success() {
            println!("{}", banner);
        } else {
            eprintln!("{}", banner);
        }
    }
    if !errors.is_empty() {
        eprint!("{}", errors);
    }
}
