//! End-to-end runs of the `quote` command against a temporary data dir.

use std::path::Path;

use clap::Parser;
use quote_cli::cli::Cli;
use quote_cli::error::ErrorCode;

fn write_config(dir: &Path) -> String {
    let path = dir.join("config.toml");
    std::fs::write(
        &path,
        format!(
            "[storage]\ndir = {:?}\n\n[company]\nname = \"Muebles Norte\"\n",
            dir.join("data").display().to_string()
        ),
    )
    .unwrap();
    path.display().to_string()
}

fn write_catalog(dir: &Path) -> String {
    let path = dir.join("catalog.json");
    std::fs::write(
        &path,
        r#"{"data": [{"id": 3, "name": "Silla Ergo", "price": 149.9},
                     {"id": 4, "name": "Mesa", "price": 99.5}]}"#,
    )
    .unwrap();
    path.display().to_string()
}

async fn quote(config: &str, args: &[&str]) -> quote_cli::error::CliResult<quote_cli::commands::Rendered> {
    let mut argv = vec!["quote", "--config", config];
    argv.extend_from_slice(args);
    quote_cli::run(Cli::try_parse_from(argv).unwrap()).await
}

#[tokio::test(start_paused = true)]
async fn cart_survives_between_invocations_and_checks_out() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let catalog = write_catalog(dir.path());

    quote(&config, &["add", &catalog, "3", "-q", "2"]).await.unwrap();
    quote(&config, &["add", &catalog, "4"]).await.unwrap();

    let cart = quote(&config, &["cart"]).await.unwrap();
    assert_eq!(cart.json["itemCount"], 3);
    assert_eq!(cart.json["total"], 39930);
    assert!(cart.text.contains("TOTAL: 399,30 €"));

    let receipt = quote(
        &config,
        &["checkout", "--name", "Ana", "--email", "ana@x.com", "--phone", "600"],
    )
    .await
    .unwrap();
    let id = receipt.json["quotation"]["id"].as_str().unwrap().to_string();
    assert!(id.starts_with("QT-"));

    let cart = quote(&config, &["cart"]).await.unwrap();
    assert_eq!(cart.json["itemCount"], 0);

    let shown = quote(&config, &["show", &id]).await.unwrap();
    assert_eq!(shown.json["total"], 39930);
    assert_eq!(shown.json["customerName"], "Ana");
}

#[tokio::test]
async fn checkout_with_bad_email_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let catalog = write_catalog(dir.path());
    quote(&config, &["add", &catalog, "4"]).await.unwrap();

    let err = quote(
        &config,
        &["checkout", "--name", "Ana", "--email", "ana", "--phone", "600"],
    )
    .await
    .unwrap_err();

    assert_eq!(err.code, ErrorCode::ValidationError);
    let cart = quote(&config, &["cart"]).await.unwrap();
    assert_eq!(cart.json["itemCount"], 1);
    let history = quote(&config, &["history"]).await.unwrap();
    assert_eq!(history.json["quotations"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn reset_clears_everything() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());
    let catalog = write_catalog(dir.path());
    quote(&config, &["add", &catalog, "3"]).await.unwrap();

    quote(&config, &["reset"]).await.unwrap();

    let cart = quote(&config, &["cart"]).await.unwrap();
    assert_eq!(cart.json["itemCount"], 0);
    assert!(!dir.path().join("data/quotation-storage.json").exists());
}
