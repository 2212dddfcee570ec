//! In-memory key-value store.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::Reply;
use crate::error::{Error, Result};
use crate::port::KeyValueStore;

/// Understands PING, ECHO, GET, SET, DEL, EXISTS, INCR and KEYS (`*` only).
///
/// Every command received is recorded, upper-cased as sent.
#[derive(Default)]
pub struct MemoryKv {
    data: Mutex<BTreeMap<String, String>>,
    sent: Mutex<Vec<(String, Vec<String>)>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands received so far.
    pub fn sent(&self) -> Vec<(String, Vec<String>)> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }

    fn arity(command: &str, args: &[String], n: usize) -> Result<()> {
        if args.len() == n {
            return Ok(());
        }
        Err(Error::Validation(format!(
            "ERR wrong number of arguments for '{}' command",
            command.to_ascii_lowercase()
        )))
    }
}

#[async_trait]
impl KeyValueStore for MemoryKv {
    async fn send(&self, command: &str, args: &[String]) -> Result<Reply> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((command.to_string(), args.to_vec()));
        }
        let mut data = self
            .data
            .lock()
            .map_err(|_| Error::Validation("store poisoned".into()))?;

        match command {
            "PING" => Ok(match args.first() {
                Some(msg) => Reply::text(msg.clone()),
                None => Reply::Status("PONG".into()),
            }),
            "ECHO" => {
                Self::arity(command, args, 1)?;
                Ok(Reply::text(args[0].clone()))
            }
            "GET" => {
                Self::arity(command, args, 1)?;
                Ok(data
                    .get(&args[0])
                    .map(|v| Reply::text(v.clone()))
                    .unwrap_or(Reply::Nil))
            }
            "SET" => {
                Self::arity(command, args, 2)?;
                data.insert(args[0].clone(), args[1].clone());
                Ok(Reply::Okay)
            }
            "DEL" => {
                let removed = args.iter().filter(|k| data.remove(*k).is_some()).count();
                Ok(Reply::Integer(removed as i64))
            }
            "EXISTS" => {
                let found = args.iter().filter(|k| data.contains_key(*k)).count();
                Ok(Reply::Integer(found as i64))
            }
            "INCR" => {
                Self::arity(command, args, 1)?;
                let current = match data.get(&args[0]) {
                    Some(v) => v.parse::<i64>().map_err(|_| {
                        Error::Validation("ERR value is not an integer or out of range".into())
                    })?,
                    None => 0,
                };
                let next = current + 1;
                data.insert(args[0].clone(), next.to_string());
                Ok(Reply::Integer(next))
            }
            "KEYS" => {
                Self::arity(command, args, 1)?;
                if args[0] != "*" {
                    return Err(Error::Validation("only KEYS * is supported".into()));
                }
                Ok(Reply::Array(
                    data.keys().map(|k| Reply::text(k.clone())).collect(),
                ))
            }
            other => Err(Error::Validation(format!("ERR unknown command '{other}'"))),
        }
    }
}
