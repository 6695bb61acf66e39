//! Parse/print round trips and batch parsing for Dockerfiles

use lst_core::{
    CollectingErrorSink, ErrorKind, ExecutionContext, HasMarkers, Input, Parser, RoundTripMismatch,
    SourceFile,
};
use lst_docker::DockerParser;
use std::path::Path;
use std::sync::Arc;

const SAMPLES: &[&str] = &[
    "FROM ubuntu:22.04\nRUN apt-get update\n",
    "",
    "# syntax=docker/dockerfile:1.6\n\nFROM --platform=$BUILDPLATFORM golang:1.22 AS build\nWORKDIR /src\nCOPY go.* ./\nRUN --mount=type=cache,target=/go/pkg/mod \\\n    go mod download\nCOPY . .\nRUN CGO_ENABLED=0 go build -o /out/app ./cmd/app\n\nFROM gcr.io/distroless/static:nonroot\nCOPY --from=build /out/app /app\nUSER nonroot:nonroot\nENTRYPOINT [\"/app\"]\n",
    "FROM python:3.12-slim\nENV PYTHONDONTWRITEBYTECODE=1 \\\n    PYTHONUNBUFFERED=1\nARG EXTRAS\nLABEL org.opencontainers.image.title=\"demo app\" \\\n      maintainer='ops@example.com'\nEXPOSE 8000/tcp\nVOLUME [\"/data\", \"/cache\"]\nCMD [\"python\", \"-m\", \"demo\"]\n",
    "FROM debian\nRUN set -eux; \\\n    # comment lines inside a continuation\n    apt-get update; \\\n\n    apt-get install -y --no-install-recommends ca-certificates; \\\n    rm -rf /var/lib/apt/lists/*\n",
    "# escape=`\nFROM mcr.microsoft.com/windows/servercore:ltsc2022\nRUN powershell -Command `\n    Write-Host hello\nWORKDIR C:\\app\n",
    "from alpine\n  run   echo   spaced\nonbuild RUN make\n",
    "FROM a\r\nRUN b \\\r\n    c\r\nCMD [ \"d\" ]\r\n",
    "\u{feff}FROM scratch\nADD rootfs.tar.gz /\n",
    "HEALTHCHECK --interval=5m --timeout=3s \\\n  CMD curl -f http://localhost/ || exit 1\nSTOPSIGNAL SIGTERM\nSHELL [\"/bin/bash\", \"-c\"]\n",
    "ENV LEGACY_FORM value with several words\nMAINTAINER someone\n",
    "FROM a\n\n\n# trailing comment",
];

#[test]
fn test_samples_print_back_unchanged() {
    let parser = DockerParser::default();
    let ctx = ExecutionContext::default();
    for (i, sample) in SAMPLES.iter().enumerate() {
        let input = Input::from_string(format!("s{i}/Dockerfile"), *sample);
        let parsed = parser.parse_input(&input, None, &ctx);
        let source = parsed
            .as_source()
            .unwrap_or_else(|| panic!("sample {i} failed to parse: {sample:?}"));
        assert_eq!(source.print_all(), *sample, "sample {i}");
        assert!(
            !source.markers().contains::<RoundTripMismatch>(),
            "sample {i} has a round-trip mismatch"
        );
    }
}

#[test]
fn test_malformed_input_becomes_a_placeholder() {
    let text = "FROM alpine\n[\"not\", \"an instruction\"]\n";
    let sink = Arc::new(CollectingErrorSink::new());
    let ctx = ExecutionContext::new(sink.clone());
    let parsed = DockerParser::default().parse(&ctx, &[text]);

    assert_eq!(parsed.len(), 1);
    assert!(parsed[0].is_error());
    assert_eq!(parsed[0].print_all(), text);

    let errors = sink.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::Syntax);
    assert_eq!(errors[0].offset, Some(12));
    assert_eq!(errors[0].path, Path::new("Dockerfile"));
}

#[test]
fn test_only_dockerfiles_are_parsed() {
    let inputs = vec![
        Input::from_string("api/Dockerfile", "FROM a\n"),
        Input::from_string("main.tf", "a = 1\n"),
        Input::from_string("web/Dockerfile.prod", "FROM b\n"),
        Input::from_string("worker.dockerfile", "FROM\n"),
    ];
    let parser = DockerParser::default();
    let parsed: Vec<_> = parser
        .parse_inputs(inputs, None, &ExecutionContext::default())
        .collect();

    assert_eq!(parsed.len(), 3);
    assert_eq!(parsed[1].source_path(), Path::new("web/Dockerfile.prod"));
    assert!(parsed[2].is_error());
}

#[test]
fn test_reads_files_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Containerfile");
    std::fs::write(&path, "FROM fedora\nRUN dnf -y install git\n").unwrap();

    let parser = DockerParser::default();
    let parsed = parser.parse_input(
        &Input::from_file(path.clone()),
        Some(dir.path()),
        &ExecutionContext::default(),
    );

    assert!(!parsed.is_error());
    assert_eq!(parsed.source_path(), Path::new("Containerfile"));
    assert_eq!(parsed.print_all(), "FROM fedora\nRUN dnf -y install git\n");
}

#[test]
fn test_parallel_parsing_keeps_input_order() {
    let inputs: Vec<Input> = (0..32)
        .map(|i| Input::from_string(format!("s{i}/Dockerfile"), format!("FROM base:{i}\n")))
        .collect();
    let parsed = DockerParser::default().parse_inputs_parallel(
        &inputs,
        None,
        &ExecutionContext::default(),
    );
    for (i, tree) in parsed.iter().enumerate() {
        assert_eq!(tree.print_all(), format!("FROM base:{i}\n"));
    }
}
