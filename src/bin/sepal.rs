use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::info;

use sepal::adapters::FileSecureElement;
use sepal::model::ObjectKind;
use sepal::{LabelConfig, ObjectHandle, ObjectStore};

#[derive(Parser, Debug)]
#[command(name = "sepal")]
#[command(about = "Secure element object store for PKCS #11 labels", version)]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Directory holding the emulated secure element objects
    #[arg(long, default_value = "sepal-store")]
    pub store_dir: PathBuf,

    /// Label (hex object address) of the device certificate
    #[arg(long, default_value = LabelConfig::DEFAULT_DEVICE_CERTIFICATE)]
    pub cert_label: String,

    /// Label (hex object address) of the device public key
    #[arg(long, default_value = LabelConfig::DEFAULT_DEVICE_PUBLIC_KEY)]
    pub public_key_label: String,

    /// Label (hex object address) of the device private key
    #[arg(long, default_value = LabelConfig::DEFAULT_DEVICE_PRIVATE_KEY)]
    pub private_key_label: String,

    /// Label (hex object address) of the code verification key
    #[arg(long, default_value = LabelConfig::DEFAULT_CODE_VERIFICATION_KEY)]
    pub code_key_label: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the objects behind the configured labels
    Provision,

    /// Save an object read from stdin (or --input) under a label
    Save {
        #[arg(long)]
        label: String,

        /// Read the payload from this file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Print the handle for a label
    Find {
        #[arg(long)]
        label: String,
    },

    /// Write an object's bytes to stdout
    Read {
        /// Numeric object handle
        #[arg(long, conflicts_with = "label", required_unless_present = "label")]
        handle: Option<u64>,

        /// Object label, resolved to a handle first
        #[arg(long)]
        label: Option<String>,

        /// Print hex instead of raw bytes
        #[arg(long)]
        hex: bool,
    },

    /// Print the configured label table
    Labels,
}

impl Cli {
    fn label_config(&self) -> LabelConfig {
        LabelConfig {
            device_certificate: self.cert_label.clone(),
            device_public_key: self.public_key_label.clone(),
            device_private_key: self.private_key_label.clone(),
            code_verification_key: self.code_key_label.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.verbosity.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let config = cli.label_config();
    let device = FileSecureElement::open(&cli.store_dir)
        .with_context(|| format!("failed to open store {}", cli.store_dir.display()))?;

    match cli.command {
        Commands::Provision => {
            device
                .provision_labels(&config)
                .context("failed to provision objects")?;
            info!("Provisioned objects in {}", device.dir().display());
        }

        Commands::Save { label, input } => {
            let data = match input {
                Some(path) => fs::read(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?,
                None => {
                    let mut buf = Vec::new();
                    io::stdin().read_to_end(&mut buf)?;
                    buf
                }
            };

            let mut store = ObjectStore::with_labels(device, &config)?;
            let handle = store.save(label.as_bytes(), &data);
            if !handle.is_valid() {
                bail!("failed to save {} bytes under label {:?}", data.len(), label);
            }
            println!("{}", handle.as_raw());
        }

        Commands::Find { label } => {
            let store = ObjectStore::with_labels(device, &config)?;
            println!("{}", store.find(label.as_bytes()).as_raw());
        }

        Commands::Read { handle, label, hex } => {
            let mut store = ObjectStore::with_labels(device, &config)?;
            let handle = match (handle, label) {
                (Some(raw), _) => ObjectHandle::from_raw(raw),
                (None, Some(label)) => store.find(label.as_bytes()),
                (None, None) => ObjectHandle::Invalid,
            };

            let value = store.get_value(handle).map_err(|e| {
                anyhow::anyhow!("{} (return value 0x{:X})", e, e.return_value())
            })?;

            let mut stdout = io::stdout();
            if hex {
                writeln!(stdout, "{}", hex::encode(value.as_bytes()))?;
            } else {
                stdout.write_all(value.as_bytes())?;
            }
            store.release_value(Some(value));
        }

        Commands::Labels => {
            let store = ObjectStore::with_labels(device, &config)?;
            for kind in ObjectKind::ALL {
                let entry = store.labels().entry(kind);
                let location = match entry.location {
                    Ok(location) => location.to_string(),
                    Err(e) => format!("unresolvable ({})", e),
                };
                println!(
                    "{:<22} {:<10} handle={} location={} {:?}",
                    format!("{:?}", kind),
                    String::from_utf8_lossy(&entry.label),
                    entry.handle().as_raw(),
                    location,
                    entry.capability()
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use tempfile::TempDir;

    fn sepal(dir: &TempDir) -> Command {
        let mut cmd = Command::cargo_bin("sepal").unwrap();
        cmd.arg("--store-dir").arg(dir.path());
        cmd
    }

    fn provisioned() -> TempDir {
        let dir = TempDir::new().unwrap();
        sepal(&dir).arg("provision").assert().success();
        dir
    }

    #[test]
    fn test_cli_version_parameter() {
        let mut cmd = Command::cargo_bin("sepal").unwrap();
        let assert = cmd.arg("--version").assert();
        assert.success();
    }

    #[test]
    fn test_cli_find() {
        let dir = TempDir::new().unwrap();
        let output = sepal(&dir)
            .args(["find", "--label", "0xE0E1"])
            .output()
            .unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "3");

        let output = sepal(&dir)
            .args(["find", "--label", "nope"])
            .output()
            .unwrap();
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "0");
    }

    #[test]
    fn test_cli_save_and_read_certificate() {
        let dir = provisioned();

        let output = sepal(&dir)
            .args(["save", "--label", "0xE0E1"])
            .write_stdin("certificate bytes")
            .output()
            .unwrap();
        assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "3");

        let output = sepal(&dir)
            .args(["read", "--handle", "3"])
            .output()
            .unwrap();
        assert!(output.status.success());
        assert_eq!(output.stdout, b"certificate bytes");

        let output = sepal(&dir)
            .args(["read", "--label", "0xE0E1", "--hex"])
            .output()
            .unwrap();
        assert_eq!(
            String::from_utf8_lossy(&output.stdout).trim(),
            hex::encode("certificate bytes")
        );
    }

    #[test]
    fn test_cli_private_key_is_not_readable() {
        let dir = provisioned();

        let output = sepal(&dir)
            .args(["save", "--label", "0xE0F1"])
            .write_stdin("secret")
            .output()
            .unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "1");

        let output = sepal(&dir)
            .args(["read", "--handle", "1"])
            .output()
            .unwrap();
        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("Key handle invalid"));
    }

    #[test]
    fn test_cli_save_fails_without_provisioning() {
        let dir = TempDir::new().unwrap();

        sepal(&dir)
            .args(["save", "--label", "0xF1D1"])
            .write_stdin("public key")
            .assert()
            .failure();
    }

    #[test]
    fn test_cli_labels_with_override() {
        let dir = TempDir::new().unwrap();
        let output = sepal(&dir)
            .args(["--cert-label", "0xE0E2", "labels"])
            .output()
            .unwrap();
        let stdout = String::from_utf8_lossy(&output.stdout);

        assert!(output.status.success());
        assert!(stdout.contains("0xE0E2"));
        assert!(stdout.contains("Unsupported"));
    }
}
