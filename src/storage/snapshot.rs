use crate::catalog::{Product, Review};
use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{de::DeserializeOwned, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tar::{Archive, Builder, Header};
use tracing::{info, warn};

const PRODUCTS_ENTRY: &str = "products.jsonl";
const REVIEWS_ENTRY: &str = "reviews.jsonl";

/// Full catalog contents, saved as a single tar.gz holding one JSONL file
/// per collection.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    pub reviews: Vec<Review>,
}

impl CatalogSnapshot {
    /// Save to `path`, replacing any previous snapshot only once the new
    /// archive is fully written.
    pub fn save(&self, path: &Path) -> Result<()> {
        info!("Saving catalog snapshot to {:?}", path);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let temp_path = path.with_extension("tmp");
        let archive_file = File::create(&temp_path)
            .with_context(|| format!("Failed to create {:?}", temp_path))?;
        let encoder = GzEncoder::new(archive_file, Compression::default());
        let mut tar = Builder::new(encoder);

        append_jsonl(&mut tar, PRODUCTS_ENTRY, &self.products)?;
        append_jsonl(&mut tar, REVIEWS_ENTRY, &self.reviews)?;

        tar.into_inner()?.finish()?;
        std::fs::rename(&temp_path, path)?;

        info!(
            products = self.products.len(),
            reviews = self.reviews.len(),
            "✅ Catalog snapshot saved"
        );
        Ok(())
    }

    /// Load a snapshot written by [`CatalogSnapshot::save`].
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Snapshot path does not exist: {:?}", path);
        }

        info!("Loading catalog snapshot from {:?}", path);

        let archive_file = File::open(path)?;
        let mut tar = Archive::new(GzDecoder::new(archive_file));
        let mut snapshot = CatalogSnapshot::default();

        for entry in tar.entries()? {
            let mut entry = entry?;
            let name = entry.path()?.to_string_lossy().into_owned();
            let mut text = String::new();
            entry.read_to_string(&mut text)?;

            match name.as_str() {
                PRODUCTS_ENTRY => snapshot.products = parse_jsonl(&text, PRODUCTS_ENTRY)?,
                REVIEWS_ENTRY => snapshot.reviews = parse_jsonl(&text, REVIEWS_ENTRY)?,
                other => warn!("Ignoring unexpected snapshot entry {}", other),
            }
        }

        info!(
            products = snapshot.products.len(),
            reviews = snapshot.reviews.len(),
            "✅ Catalog snapshot loaded"
        );
        Ok(snapshot)
    }
}

fn append_jsonl<W: std::io::Write, T: Serialize>(
    tar: &mut Builder<W>,
    name: &str,
    items: &[T],
) -> Result<()> {
    let mut body = Vec::new();
    for item in items {
        serde_json::to_writer(&mut body, item)?;
        body.push(b'\n');
    }

    let mut header = Header::new_gnu();
    header.set_size(body.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    tar.append_data(&mut header, name, body.as_slice())?;
    Ok(())
}

fn parse_jsonl<T: DeserializeOwned>(text: &str, entry: &str) -> Result<Vec<T>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(number, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("{} line {} is not valid JSON", entry, number + 1))
        })
        .collect()
}
