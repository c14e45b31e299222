use anyhow::{bail, Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// WAL operation types
///
/// Users are never removed or mutated by this service, so registration is the
/// only logged operation.
#[derive(Debug, Clone, PartialEq)]
pub enum WalOperation {
    AddUser {
        username: String,
        email: String,
        steamid: String,
        password_hash: String,
    },
}

impl WalOperation {
    // Fields are hex-encoded so the pipe separator can never collide with
    // user-supplied bytes.
    fn to_line(&self) -> String {
        match self {
            WalOperation::AddUser {
                username,
                email,
                steamid,
                password_hash,
            } => format!(
                "ADD_USER|{}|{}|{}|{}",
                hex::encode(username.as_bytes()),
                hex::encode(email.as_bytes()),
                hex::encode(steamid.as_bytes()),
                hex::encode(password_hash.as_bytes()),
            ),
        }
    }

    fn from_line(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.split('|').collect();

        match parts.first() {
            Some(&"ADD_USER") => {
                if parts.len() != 5 {
                    bail!("Invalid ADD_USER format");
                }
                let username = decode_field(parts[1]).context("Invalid username field")?;
                let email = decode_field(parts[2]).context("Invalid email field")?;
                let steamid = decode_field(parts[3]).context("Invalid steamid field")?;
                let password_hash = decode_field(parts[4]).context("Invalid password_hash field")?;

                Ok(WalOperation::AddUser {
                    username,
                    email,
                    steamid,
                    password_hash,
                })
            }
            _ => bail!("Unknown operation type"),
        }
    }
}

fn decode_field(field: &str) -> Result<String> {
    let bytes = hex::decode(field).context("Invalid hex")?;
    String::from_utf8(bytes).context("Invalid UTF-8")
}

pub struct Wal {
    file: Arc<Mutex<File>>,
    path: PathBuf,
}

impl Wal {
    pub fn new(path: PathBuf) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .context("Failed to open WAL file")?;

        Ok(Wal {
            file: Arc::new(Mutex::new(file)),
            path,
        })
    }

    pub fn log_operation(&self, op: WalOperation) -> Result<()> {
        let line = op.to_line();
        let mut file = self.file.lock().unwrap();
        writeln!(file, "{}", line).context("Failed to write to WAL")?;
        file.flush().context("Failed to flush WAL")?;
        Ok(())
    }

    pub fn replay(&self) -> Result<Vec<WalOperation>> {
        let file = File::open(&self.path).context("Failed to open WAL for replay")?;
        let reader = BufReader::new(file);
        let mut operations = Vec::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result.context("Failed to read line from WAL")?;
            let line = line.trim();

            // Skip empty lines
            if line.is_empty() {
                continue;
            }

            match WalOperation::from_line(line) {
                Ok(op) => operations.push(op),
                Err(e) => {
                    tracing::warn!(
                        line_num = line_num + 1,
                        error = %e,
                        "Failed to parse WAL line, skipping"
                    );
                }
            }
        }

        Ok(operations)
    }

    pub fn truncate(&self) -> Result<()> {
        let mut file = self.file.lock().unwrap();
        file.set_len(0).context("Failed to truncate WAL")?;
        file.flush().context("Failed to flush WAL after truncate")?;
        Ok(())
    }
}
