//! Handler for the `kv` command.

use crate::adapter::inbound::cli::command::KvArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::outbound::kv::RedisStore;
use crate::application::KvService;
use crate::error::{Error, Result};
use crate::infrastructure::config::Resolver;
use crate::port::KeyValueStore;

/// Execute the kv command.
pub async fn execute(args: &KvArgs, resolver: &Resolver<'_>) -> Result<()> {
    if args.command.trim().is_empty() {
        return Err(Error::Validation("a command name is required".into()));
    }

    let settings = resolver.kv(args.url.clone())?;
    let store = output::with_spinner(
        "Connecting to key-value store",
        "Connected to key-value store",
        RedisStore::connect(&settings),
    )
    .await?;

    send(&store, &args.command, &args.args).await
}

/// Send one command and print its reply.
pub async fn send<S>(store: &S, command: &str, args: &[String]) -> Result<()>
where
    S: KeyValueStore + ?Sized,
{
    let reply = KvService::new(store).send(command, args).await?;
    output::reply(&reply);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::inbound::cli::command::ColorChoice;
    use crate::adapter::inbound::cli::output::capture::Captured;
    use crate::adapter::inbound::cli::output::OutputConfig;
    use crate::testkit::kv::MemoryKv;

    #[tokio::test]
    async fn replies_are_sent_upper_cased() {
        let store = MemoryKv::new();
        send(&store, "ping", &[]).await.unwrap();
        assert_eq!(store.sent()[0].0, "PING");
    }

    #[tokio::test]
    async fn server_errors_propagate() {
        let store = MemoryKv::new();
        let err = send(&store, "FLUSHALL", &[]).await.unwrap_err();
        assert!(err.to_string().contains("unknown command"));
    }

    #[tokio::test]
    async fn reply_prints_raw_text() {
        let captured = Captured::start(OutputConfig::new(false, false, ColorChoice::Never));
        let store = MemoryKv::new();
        send(&store, "SET", &["greeting".into(), "Hello World".into()])
            .await
            .unwrap();
        send(&store, "GET", &["greeting".into()]).await.unwrap();
        send(&store, "GET", &["missing".into()]).await.unwrap();

        assert_eq!(captured.stdout(), ["OK", "Hello World", "null"]);
    }

    #[tokio::test]
    async fn json_reply_is_wrapped() {
        let captured = Captured::start(OutputConfig::new(true, true, ColorChoice::Never));
        let store = MemoryKv::new();
        send(&store, "PING", &[]).await.unwrap();

        let line: serde_json::Value = serde_json::from_str(&captured.stdout()[0]).unwrap();
        assert_eq!(line, serde_json::json!({ "type": "reply", "payload": "PONG" }));
    }

    #[tokio::test]
    async fn quiet_mode_keeps_the_reply() {
        let captured = Captured::start(OutputConfig::new(false, true, ColorChoice::Never));
        let store = MemoryKv::new();
        send(&store, "ECHO", &["still here".into()]).await.unwrap();

        assert_eq!(captured.stdout(), ["still here"]);
    }
}
