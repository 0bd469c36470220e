use std::sync::Arc;

use tracing::error;

use fruitstand::{Config, MongoStore, Server, router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    // An unreachable store at startup is fatal; there is nothing useful to
    // serve without it.
    let store = match MongoStore::connect(&config).await {
        Ok(store) => Arc::new(store),
        Err(e) => {
            error!("failed to connect to mongo store: {e}");
            std::process::exit(1);
        }
    };

    let app = router(store);

    if let Err(e) = Server::bind(&config.addr()).serve(app).await {
        error!("server error: {e}");
        std::process::exit(1);
    }
}
