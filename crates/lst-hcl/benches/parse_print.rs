use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lst_core::{ParserOptions, SourceFile};
use lst_hcl::{AutoFormat, parse_config_file};
use rayon::prelude::*;
use std::hint::black_box;
use std::path::Path;

const MODULE: &str = r#"# Network module
variable "cidr" {
  type    = string
  default = "10.0.0.0/16"
}

locals {
  azs     = ["eu-west-1a", "eu-west-1b", "eu-west-1c"]
  subnets = { for i, az in local.azs : az => cidrsubnet(var.cidr, 8, i) }
  tags = {
    Name = "main-${var.env}"
    Env  = var.env != "" ? var.env : "dev"
  }
}

resource "aws_vpc" "main" {
  cidr_block           = var.cidr
  enable_dns_hostnames = true
  tags                 = local.tags
}

resource "aws_subnet" "private" {
  count             = length(local.azs)
  vpc_id            = aws_vpc.main.id
  availability_zone = local.azs[count.index]
  cidr_block        = local.subnets[local.azs[count.index]]
}

output "subnet_ids" {
  value = aws_subnet.private[*].id
}
"#;

fn module_of(copies: usize) -> String {
    MODULE.repeat(copies)
}

fn bench_parse_print(c: &mut Criterion) {
    let mut group = c.benchmark_group("hcl");
    let options = ParserOptions::default();

    for copies in [1, 10, 100] {
        let text = module_of(copies);
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(BenchmarkId::new("parse", copies), &text, |b, text| {
            b.iter(|| black_box(parse_config_file(Path::new("main.tf"), text, &options)))
        });

        let file = parse_config_file(Path::new("main.tf"), &text, &options)
            .expect("benchmark module parses");
        group.bench_with_input(BenchmarkId::new("print", copies), &file, |b, file| {
            b.iter(|| black_box(file.print_all()))
        });
    }

    group.finish();
}

fn bench_format(c: &mut Criterion) {
    let options = ParserOptions::default();
    let file = std::sync::Arc::new(
        parse_config_file(Path::new("main.tf"), &module_of(10), &options)
            .expect("benchmark module parses"),
    );
    c.bench_function("hcl/auto_format", |b| {
        b.iter(|| {
            let mut formatter = AutoFormat::new(Default::default());
            black_box(lst_hcl::HclVisitor::visit(&mut formatter, &file, &mut ()))
        })
    });
}

fn bench_parallel(c: &mut Criterion) {
    let options = ParserOptions::default();
    let files: Vec<String> = (0..64).map(|_| MODULE.to_string()).collect();
    c.bench_function("hcl/parse_64_files_parallel", |b| {
        b.iter(|| {
            let parsed: Vec<_> = files
                .par_iter()
                .map(|text| parse_config_file(Path::new("main.tf"), text, &options))
                .collect();
            black_box(parsed)
        })
    });
}

criterion_group!(benches, bench_parse_print, bench_format, bench_parallel);
criterion_main!(benches);
