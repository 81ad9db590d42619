use std::fs;
use std::io::{self, Cursor, Read};
use std::path::Path;

use encoding_rs::EUC_JP;
use tracing::debug;

use super::{SourceError, KANJIDIC_FILE, KANJIVG_FILE, KRADFILE, KRADFILE2};

const KANJIDIC_URL: &str = "http://www.edrdg.org/kanjidic/kanjidic2.xml.gz";
const KANJIVG_URL: &str =
    "https://github.com/KanjiVG/kanjivg/releases/download/r20240807/kanjivg-20240807.xml.gz";
const KRADZIP_URL: &str = "http://ftp.edrdg.org/pub/Nihongo/kradzip.zip";

/// Archive member names and the UTF-8 files they are converted into.
const KRAD_MEMBERS: [(&str, &str); 2] = [("kradfile", KRADFILE), ("kradfile2", KRADFILE2)];

/// Download the raw sources into `dest`. Files already present are kept.
pub fn fetch(dest: &Path) -> Result<(), SourceError> {
    fs::create_dir_all(dest)?;

    for (url, name) in [(KANJIDIC_URL, KANJIDIC_FILE), (KANJIVG_URL, KANJIVG_FILE)] {
        let path = dest.join(name);
        if path.exists() {
            eprintln!("  {name} (already exists, skipping)");
            continue;
        }
        eprintln!("  {name}");
        fs::write(&path, download(url)?)?;
    }

    let missing: Vec<(&str, &str)> = KRAD_MEMBERS
        .into_iter()
        .filter(|(_, out)| {
            let exists = dest.join(out).exists();
            if exists {
                eprintln!("  {out} (already exists, skipping)");
            }
            !exists
        })
        .collect();
    if !missing.is_empty() {
        eprintln!("  kradzip.zip");
        let archive = download(KRADZIP_URL)?;
        extract_kradfiles(&archive, &missing, dest)?;
    }
    Ok(())
}

fn download(url: &str) -> Result<Vec<u8>, SourceError> {
    debug!(url, "downloading");
    ureq::get(url)
        .call()
        .map_err(|e| SourceError::Http(format!("{url}: {e}")))?
        .into_body()
        .with_config()
        .limit(100 * 1024 * 1024)
        .read_to_vec()
        .map_err(|e| SourceError::Http(format!("{url}: {e}")))
}

/// Pull the EUC-JP radical files out of the archive and write them as UTF-8.
fn extract_kradfiles(
    archive: &[u8],
    members: &[(&str, &str)],
    dest: &Path,
) -> Result<(), SourceError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(archive)).map_err(zip_err)?;
    for &(member, out) in members {
        let mut raw = Vec::new();
        archive
            .by_name(member)
            .map_err(zip_err)?
            .read_to_end(&mut raw)?;
        let text = decode_euc_jp(&raw)
            .ok_or_else(|| SourceError::Parse(format!("{member}: invalid EUC-JP")))?;
        fs::write(dest.join(out), text)?;
        eprintln!("    → {out}");
    }
    Ok(())
}

fn decode_euc_jp(raw: &[u8]) -> Option<String> {
    EUC_JP
        .decode_without_bom_handling_and_without_replacement(raw)
        .map(|text| text.into_owned())
}

fn zip_err(e: impl std::fmt::Display) -> SourceError {
    SourceError::Io(io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
}
