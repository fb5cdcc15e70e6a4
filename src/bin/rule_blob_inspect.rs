use std::fs;
use std::path::PathBuf;

use autocoin_rules::codec::decode_document;
use autocoin_rules::core::{BuiltinVocabularyProvider, Locale, VocabularyProvider};
use autocoin_rules::{CodecConfig, DecodeStatus, RuleCodec};
use serde::Serialize;

#[derive(Debug)]
struct CliArgs {
    blob: BlobSource,
    locale: Option<Locale>,
    config_path: Option<PathBuf>,
}

#[derive(Debug)]
enum BlobSource {
    Inline(String),
    File(PathBuf),
}

#[derive(Debug, Serialize)]
struct InspectReport<'a> {
    status: String,
    document: Option<serde_json::Value>,
    rule_set: &'a autocoin_rules::core::RuleSet,
    warnings: Vec<String>,
}

fn main() {
    let _ = autocoin_rules::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let blob = match &args.blob {
        BlobSource::Inline(blob) => blob.clone(),
        BlobSource::File(path) => fs::read_to_string(path)
            .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?,
    };

    let mut config = match &args.config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            CodecConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => CodecConfig::default(),
    };
    if let Some(locale) = args.locale {
        config = config.with_locale(locale);
    }

    let snapshot = BuiltinVocabularyProvider
        .rebuild(config.locale)
        .map_err(|err| err.to_string())?;
    let codec = RuleCodec::new(snapshot, config).map_err(|err| err.to_string())?;

    let document = decode_document(&blob).ok().map(serde_json::Value::Array);
    let outcome = codec.decode(&blob);
    let status = match &outcome.status {
        DecodeStatus::Decoded => "decoded".to_owned(),
        DecodeStatus::Empty => "empty".to_owned(),
        DecodeStatus::Invalid { reason } => format!("invalid: {reason}"),
    };

    let report = InspectReport {
        status,
        document,
        rule_set: &outcome.rule_set,
        warnings: outcome.warnings.iter().map(ToString::to_string).collect(),
    };
    let serialized = serde_json::to_string_pretty(&report)
        .map_err(|err| format!("failed to serialize report: {err}"))?;
    println!("{serialized}");
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut blob: Option<BlobSource> = None;
    let mut locale: Option<Locale> = None;
    let mut config_path: Option<PathBuf> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--blob" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --blob".to_owned())?;
                blob = Some(BlobSource::Inline(value));
            }
            "--file" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --file".to_owned())?;
                blob = Some(BlobSource::File(PathBuf::from(value)));
            }
            "--locale" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --locale".to_owned())?;
                locale = Some(Locale::from_language_tag(&value));
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config_path = Some(PathBuf::from(value));
            }
            "-h" | "--help" => {
                println!(
                    "Usage: cargo run --bin rule_blob_inspect -- (--blob <base64> | --file <path>) [--locale <tag>] [--config <path>]"
                );
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`"));
            }
        }
    }

    let blob = blob.ok_or_else(|| "one of --blob or --file is required".to_owned())?;
    Ok(CliArgs {
        blob,
        locale,
        config_path,
    })
}
