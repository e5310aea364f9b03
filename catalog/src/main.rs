use application::service::{
    AddBookService, DisplayBookService, LendBookService, RemoveBookService, SearchBookService,
};
use application::transfer::{
    CreateBookDto, GetBookDto, LendBookDto, LendByCriteriaDto, RemoveBookDto, SearchBookDto,
};
use catalog::controller::Exhaust;
use catalog::error::{describe, StackTrace};
use catalog::handler::Catalog;
use catalog::response::CatalogPresenter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

static LOG_DIR: &str = "CATALOG_LOG_DIR";

#[tokio::main]
async fn main() -> Result<(), StackTrace> {
    // A missing .env file is fine, every setting has a default.
    dotenvy::dotenv().ok();

    let log_dir = dotenvy::var(LOG_DIR).unwrap_or_else(|_| "./logs/".into());
    let appender = tracing_appender::rolling::daily(std::path::Path::new(&log_dir), "debug.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(tracing_subscriber::EnvFilter::new(
                    std::env::var("RUST_LOG").unwrap_or_else(|_| {
                        "driver=debug,application=debug,catalog=debug".into()
                    }),
                ))
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(non_blocking_appender)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .init();

    let catalog = Catalog::new();

    catalog
        .add_book(CreateBookDto::new("Pan Tadeusz", "Adam Mickiewicz", 1834))
        .await?;
    catalog
        .add_book(CreateBookDto::new("Lalka", "Boleslaw Prus", 1890))
        .await?;
    catalog
        .add_book(CreateBookDto::new("Odyseja", "Homer", 1990))
        .await?;
    catalog
        .add_book(CreateBookDto::new("Odyseja", "Homer", 1990))
        .await?;

    for entry in CatalogPresenter.emit(catalog.display_all().await?) {
        println!("{entry}");
    }

    let criteria = SearchBookDto {
        title: Some("Odyseja".to_string()),
        author: Some("Homer".to_string()),
        year: None,
    };
    for book in CatalogPresenter.emit(catalog.search(criteria.clone()).await?) {
        println!("Found {book}");
    }

    let lent = catalog
        .lend_by_criteria(LendByCriteriaDto {
            criteria,
            borrower: "Jan Kowalski".to_string(),
        })
        .await?;
    println!("Lent {}", CatalogPresenter.emit(lent));

    let id = catalog
        .add_book(CreateBookDto::new("Iliada", "Homer", 1990))
        .await?;
    catalog
        .lend_by_copy_id(LendBookDto {
            id,
            borrower: "Anna Kowalska".to_string(),
        })
        .await?;
    println!(
        "{}",
        CatalogPresenter.emit(catalog.display_one(GetBookDto { id }).await?)
    );

    for attempt in [id, uuid::Uuid::new_v4()] {
        match catalog.remove_book(RemoveBookDto { id: attempt }).await {
            Ok(()) => println!("Removed {attempt}"),
            Err(report) => match describe(&report) {
                Some(message) => {
                    tracing::warn!(id = %attempt, %message, "removal refused");
                    println!("{message}");
                }
                None => return Err(report.into()),
            },
        }
    }

    Ok(())
}
