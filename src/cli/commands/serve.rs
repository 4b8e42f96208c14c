//! Serve the JSON API

use herbtrace::core::services::Ledger;

use crate::server::tiny_http;

/// Where and how to serve
#[derive(Debug, Clone)]
pub struct ServeOptions {
    /// Bind address
    pub host: String,
    /// Port
    pub port: u16,
    /// Seed the demo batch before serving if the ledger is empty
    pub seed_demo: bool,
}

/// Start the HTTP server
pub fn serve(ledger: &Ledger, options: &ServeOptions) -> anyhow::Result<()> {
    if options.seed_demo
        && let Some(demo) = ledger.seed_demo_if_empty()?
    {
        println!("Seeded demo batch {}", demo.id);
    }

    tiny_http::serve(ledger, &options.host, options.port)
}
