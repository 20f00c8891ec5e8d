#[tokio::main]
async fn main() {
    if let Err(err) = scheme_connect_api::run().await {
        eprintln!("scheme-connect-api: {err}");
        std::process::exit(1);
    }
}
