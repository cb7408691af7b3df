use std::{borrow::Cow, sync::OnceLock};

use rust_embed::RustEmbed;
use tracing::warn;

/// Embed the entire `assets/` directory into the binary.
#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

static MAIN_CSS: OnceLock<String> = OnceLock::new();
static TAILWIND_CSS: OnceLock<String> = OnceLock::new();
static FAVICON_DATA_URI: OnceLock<String> = OnceLock::new();

pub fn main_css() -> &'static str {
    MAIN_CSS.get_or_init(|| load_text("main.css")).as_str()
}

/// Generated by the Tailwind build; empty when the app was built without it.
pub fn tailwind_css() -> &'static str {
    TAILWIND_CSS.get_or_init(|| load_text("tailwind.css")).as_str()
}

pub fn favicon_data_uri() -> &'static str {
    FAVICON_DATA_URI
        .get_or_init(|| load_data_uri("favicon.svg"))
        .as_str()
}

fn load_text(path: &str) -> String {
    let Some(asset) = load_asset(path) else {
        return String::new();
    };
    match String::from_utf8(asset.into_owned()) {
        Ok(text) => text,
        Err(_) => {
            warn!(path, "embedded asset is not valid UTF-8");
            String::new()
        }
    }
}

fn load_data_uri(path: &str) -> String {
    let data = load_asset(path).unwrap_or_default();
    format!("data:{};base64,{}", guess_mime(path), encode_base64(&data))
}

fn load_asset(path: &str) -> Option<Cow<'static, [u8]>> {
    let asset = EmbeddedAssets::get(path).map(|file| file.data);
    if asset.is_none() {
        warn!(path, "embedded asset missing");
    }
    asset
}

fn guess_mime(path: &str) -> &'static str {
    match path.rsplit_once('.').map(|(_, ext)| ext) {
        Some("css") => "text/css",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

fn encode_base64(input: &[u8]) -> String {
    const TABLE: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
    let mut output = String::with_capacity(input.len().div_ceil(3) * 4);

    for chunk in input.chunks(3) {
        let b0 = chunk[0];
        let b1 = chunk.get(1).copied().unwrap_or(0);
        let b2 = chunk.get(2).copied().unwrap_or(0);

        output.push(TABLE[(b0 >> 2) as usize] as char);
        output.push(TABLE[(((b0 & 0b11) << 4) | (b1 >> 4)) as usize] as char);
        output.push(if chunk.len() > 1 {
            TABLE[(((b1 & 0b1111) << 2) | (b2 >> 6)) as usize] as char
        } else {
            '='
        });
        output.push(if chunk.len() > 2 {
            TABLE[(b2 & 0b0011_1111) as usize] as char
        } else {
            '='
        });
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_pads_short_chunks() {
        assert_eq!(encode_base64(b""), "");
        assert_eq!(encode_base64(b"f"), "Zg==");
        assert_eq!(encode_base64(b"fo"), "Zm8=");
        assert_eq!(encode_base64(b"foo"), "Zm9v");
        assert_eq!(encode_base64("Kč".as_bytes()), "S8SN");
    }

    #[test]
    fn bundled_assets_load() {
        assert!(main_css().contains("body"));
        assert!(favicon_data_uri().starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn missing_assets_degrade_to_empty() {
        assert_eq!(load_text("does-not-exist.css"), "");
        assert_eq!(guess_mime("x.bin"), "application/octet-stream");
    }
}
