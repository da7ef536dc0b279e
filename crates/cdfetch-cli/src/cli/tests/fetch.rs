//! Tests for the fetch and config subcommands.

use super::parse;
use crate::cli::{Cli, CliCommand};
use cdfetch_core::FetchConfig;
use clap::Parser;
use std::time::Duration;

#[test]
fn cli_parse_fetch_defaults() {
    match parse(&["cdfetch", "fetch", "https://example.com"]) {
        CliCommand::Fetch(args) => {
            assert_eq!(args.target, "https://example.com");
            assert_eq!(args.method, "GET");
            assert!(args.headers.is_empty());
            assert!(args.data.is_none());
            assert!(args.timeout.is_none());
            assert!(!args.ignore_status_codes);
            assert!(!args.binary);
            assert!(!args.empty_is_change);
            assert!(args.proxy.is_none());
            assert!(!args.include);
            assert!(!args.json);
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_all_flags() {
    match parse(&[
        "cdfetch",
        "fetch",
        "https://a.example|https://b.example",
        "-X",
        "POST",
        "-H",
        "Accept: text/html",
        "--header",
        "X-Token: abc",
        "-d",
        "q=1",
        "--timeout",
        "7",
        "--ignore-status-codes",
        "--empty-is-change",
        "--proxy",
        "socks5://p:1080",
        "-i",
    ]) {
        CliCommand::Fetch(args) => {
            assert_eq!(args.target, "https://a.example|https://b.example");
            assert_eq!(args.method, "POST");
            assert_eq!(
                args.headers,
                vec![
                    ("Accept".to_string(), "text/html".to_string()),
                    ("X-Token".to_string(), "abc".to_string()),
                ]
            );
            assert_eq!(args.data.as_deref(), Some("q=1"));
            assert_eq!(args.timeout, Some(7));
            assert!(args.ignore_status_codes);
            assert!(args.empty_is_change);
            assert_eq!(args.proxy.as_deref(), Some("socks5://p:1080"));
            assert!(args.include);

            let req = args.to_request(&FetchConfig::default());
            assert_eq!(req.timeout, Duration::from_secs(7));
            assert_eq!(req.headers.get("X-Token").map(String::as_str), Some("abc"));
            assert_eq!(req.body.as_ref().map(|b| b.as_bytes()), Some(&b"q=1"[..]));
            assert_eq!(req.proxy_override.as_deref(), Some("socks5://p:1080"));
            assert!(req.ignore_status_codes);
            assert!(req.empty_pages_are_a_change);
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_fetch_timeout_defaults_to_config() {
    match parse(&["cdfetch", "fetch", "https://example.com", "--binary"]) {
        CliCommand::Fetch(args) => {
            let cfg = FetchConfig {
                default_timeout_secs: 12,
                ..FetchConfig::default()
            };
            let req = args.to_request(&cfg);
            assert_eq!(req.timeout, Duration::from_secs(12));
            assert!(req.is_binary);
        }
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_fetch_rejects_zero_timeout() {
    assert!(Cli::try_parse_from(["cdfetch", "fetch", "https://x", "--timeout", "0"]).is_err());
    assert!(Cli::try_parse_from(["cdfetch", "fetch", "https://x", "--timeout", "1"]).is_ok());
}

#[test]
fn cli_fetch_rejects_bad_header() {
    assert!(Cli::try_parse_from(["cdfetch", "fetch", "https://x", "-H", "nocolon"]).is_err());
}

#[test]
fn cli_fetch_json_conflicts_with_include() {
    assert!(Cli::try_parse_from(["cdfetch", "fetch", "https://x", "--json", "-i"]).is_err());
}

#[test]
fn cli_parse_config() {
    match parse(&["cdfetch", "config"]) {
        CliCommand::Config => {}
        _ => panic!("expected Config"),
    }
}
