// Copyright (c) 2022-2023 The MobileCoin Foundation

use std::{path::Path, time::SystemTime};

use log::debug;
use serde::{de::DeserializeOwned, Serialize};
use zeroize::Zeroize;

/// Fixed length hex encoded argument, zeroized on drop
#[derive(Clone, PartialEq, Debug)]
pub struct HexData<const N: usize = 32>(pub [u8; N]);

impl<const N: usize> std::str::FromStr for HexData<N> {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut b = [0u8; N];

        hex::decode_to_slice(s, &mut b)?;

        Ok(HexData(b))
    }
}

impl<const N: usize> AsRef<[u8; N]> for HexData<N> {
    fn as_ref(&self) -> &[u8; N] {
        &self.0
    }
}

impl<const N: usize> Drop for HexData<N> {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Current time in seconds, for bundle timestamps
pub fn now() -> anyhow::Result<u32> {
    let t = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH)?;

    Ok(u32::try_from(t.as_secs())?)
}

/// Helper to read JSON input files
pub async fn read_input<T: DeserializeOwned>(file_name: &str) -> anyhow::Result<T> {
    debug!("Reading input from '{}'", file_name);

    let s = tokio::fs::read_to_string(file_name).await?;

    // Determine format from file name
    let p = Path::new(file_name);

    let v = match p.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&s)?,
        _ => return Err(anyhow::anyhow!("unsupported input file format")),
    };

    Ok(v)
}

/// Helper to write output, to a file if provided or to stdout otherwise
pub async fn write_output(file_name: Option<&str>, value: &impl Serialize) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;

    let file_name = match file_name {
        Some(f) => f,
        None => {
            println!("{}", s);
            return Ok(());
        }
    };

    debug!("Writing output to '{}'", file_name);

    // Determine format from file name
    let p = Path::new(file_name);
    match p.extension().and_then(|e| e.to_str()) {
        Some("json") => tokio::fs::write(p, s).await?,
        _ => return Err(anyhow::anyhow!("unsupported output file format")),
    }

    Ok(())
}
