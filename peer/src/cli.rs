use clap::Parser;

/// Standalone DHT peer: binds a UDP socket, answers ping requests, and
/// learns senders into its routing table.
#[derive(Parser, Debug)]
#[command(version, author)]
pub struct Opts {
    /// Address to bind to.
    #[arg(long, default_value = "127.0.0.1")]
    pub address: String,

    /// Port to bind to.
    #[arg(long, default_value_t = 9000)]
    pub port: u16,

    /// Known `address:port` peers accepted as a network entry point.
    /// Recorded, not yet acted on — joining via bootstrap is future work.
    #[arg(long = "bootstrap", value_name = "ADDRESS:PORT")]
    pub bootstrap: Vec<String>,

    /// Message to send to --address:--port, then exit, instead of
    /// running as a long-lived peer. Matches the reference CLI's
    /// standalone `send` script.
    pub message: Option<String>,
}
