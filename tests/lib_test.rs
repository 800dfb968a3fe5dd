//! Library integration tests.

use reqgate::ReqgateError;

#[test]
fn error_types_are_public() {
    let err = ReqgateError::UnsupportedRuntimeVersion {
        version: "2.7".into(),
    };
    assert!(err.to_string().contains("2.7"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> reqgate::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use reqgate::cli::{Cli, Commands};

    let cli = Cli::parse_from(["reqgate", "requirements", "--runtime-version", "3.12"]);

    if let Commands::Requirements(args) = cli.command {
        assert_eq!(args.runtime_versions, vec!["3.12"]);
    } else {
        panic!("Expected Requirements command");
    }
}

#[test]
fn parser_is_public() {
    use reqgate::requirements::parse_requirement;

    let req = parse_requirement("--no-deps Some_Pkg[extra]>=1.0").unwrap();
    assert_eq!(req.name(), "some-pkg");
    assert_eq!(req.flags(), ["--no-deps"]);
}

#[test]
fn normalization_is_idempotent() {
    use reqgate::requirements::normalize_name;

    for raw in ["Some_Pkg", "some-pkg", "SOME_PKG"] {
        let once = normalize_name(raw);
        assert_eq!(once, "some-pkg");
        assert_eq!(normalize_name(&once), once);
    }
}

#[test]
fn every_embedded_version_loads() {
    use reqgate::requirements::StandardLibraryIndex;

    let versions: Vec<String> = StandardLibraryIndex::available_versions()
        .into_iter()
        .collect();
    let index = StandardLibraryIndex::load(&versions).unwrap();

    assert!(versions.contains(&"3.8".to_string()));
    for version in &versions {
        assert!(index.contains(version, "os"));
        assert!(!index.contains(version, "requests"));
    }
}
