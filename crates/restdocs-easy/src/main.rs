//! CLI for `restdocs-easy`.
//!
//! Prints documentation descriptors for shapes declared in a YAML catalog.
//!
//! # Subcommands
//!
//! ```text
//! # Descriptors for one shape, converted for a snippet flavor
//! restdocs-easy describe \
//!   --catalog docs/shapes.yaml \
//!   --shape com.example.MemberRequest \
//!   --config docs/restdocs.yaml \
//!   --prefix member. \
//!   --group Create \
//!   --as fields --format yaml
//!
//! # Every shape with its documentable fields
//! restdocs-easy shapes --catalog docs/shapes.yaml
//! ```

#![forbid(unsafe_code)]

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use restdocs_easy::{reflect, DocsConfig, Operator, RestDocs, ShapeCatalog, ValidationGroup};

/// REST API documentation descriptor generator.
#[derive(Parser)]
#[command(name = "restdocs-easy", version, about)]
enum Cli {
    /// Print the descriptors generated for one shape.
    Describe(DescribeArgs),

    /// List catalog shapes and their documentable fields.
    Shapes(ShapesArgs),
}

#[derive(Parser)]
struct DescribeArgs {
    /// Path to the shape catalog YAML file.
    #[arg(long)]
    catalog: PathBuf,

    /// Shape to describe (qualified or unambiguous simple name).
    #[arg(short, long)]
    shape: String,

    /// Path to a docs config file (YAML, or TOML by extension).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Prefix applied verbatim to every path (e.g., `member.` or `[].`).
    #[arg(short, long)]
    prefix: Option<String>,

    /// Active validation group. Repeat for several groups.
    #[arg(short, long = "group")]
    groups: Vec<String>,

    /// Descriptor flavor to convert to.
    #[arg(long = "as", value_enum, default_value_t = Flavor::Fields)]
    flavor: Flavor,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Yaml)]
    format: Format,
}

#[derive(Parser)]
struct ShapesArgs {
    /// Path to the shape catalog YAML file.
    #[arg(long)]
    catalog: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum Flavor {
    Fields,
    Subsections,
    Parameters,
    Parts,
    Headers,
    Cookies,
    Links,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli {
        Cli::Describe(args) => run_describe(&args),
        Cli::Shapes(args) => run_shapes(&args),
    }
}

fn load_catalog(path: &Path) -> anyhow::Result<ShapeCatalog> {
    ShapeCatalog::load(path).with_context(|| format!("Failed to load catalog: {}", path.display()))
}

fn run_describe(args: &DescribeArgs) -> anyhow::Result<()> {
    let output = describe(args)?;
    std::io::stdout()
        .write_all(output.as_bytes())
        .context("Failed to write output")?;
    Ok(())
}

fn describe(args: &DescribeArgs) -> anyhow::Result<String> {
    let catalog = load_catalog(&args.catalog)?;
    let shape = catalog.get(&args.shape)?;

    let mut builder = RestDocs::builder();
    if let Some(path) = &args.config {
        let config = DocsConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;
        builder = builder
            .with_config(&config)
            .context("Failed to apply config")?;
    }
    let docs = builder.build();

    let groups: Vec<ValidationGroup> = args.groups.iter().map(ValidationGroup::new).collect();
    let operator = docs
        .generate_with(args.prefix.as_deref(), shape, &groups)
        .with_context(|| format!("Failed to generate descriptors for {}", args.shape))?;

    render_flavor(&operator, args.flavor, args.format)
}

fn render_flavor(operator: &Operator, flavor: Flavor, format: Format) -> anyhow::Result<String> {
    match flavor {
        Flavor::Fields => render(&operator.to_field(), format),
        Flavor::Subsections => render(&operator.to_subsection(), format),
        Flavor::Parameters => render(&operator.to_parameter(), format),
        Flavor::Parts => render(&operator.to_request_part(), format),
        Flavor::Headers => render(&operator.to_header(), format),
        Flavor::Cookies => render(&operator.to_cookie(), format),
        Flavor::Links => render(&operator.to_link(), format),
    }
}

fn render<T: Serialize>(value: &T, format: Format) -> anyhow::Result<String> {
    match format {
        Format::Yaml => serde_yaml_ng::to_string(value).context("Failed to serialize YAML"),
        Format::Json => {
            let mut json =
                serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn run_shapes(args: &ShapesArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(&args.catalog)?;
    list_shapes(&catalog, &mut std::io::stdout().lock())
}

fn list_shapes(catalog: &ShapeCatalog, out: &mut impl Write) -> anyhow::Result<()> {
    for shape in catalog.shapes() {
        let fields: Vec<String> = reflect(shape)
            .into_iter()
            .map(|metadata| metadata.field_name)
            .collect();
        writeln!(out, "{} ({:?}): {}", shape.ty().name(), shape.ty().kind(), fields.join(", "))
            .context("Failed to write output")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = "\
shapes:
  - name: com.example.Level
    kind: enum
    constants: [LOW, HIGH]
  - name: com.example.Login
    fields:
      - name: email
        type: String
        annotations:
          - name: NotBlank
      - name: remember
        type: bool
      - name: secret
        type: String
        accessor: none
";

    /// Write content to a temporary file and return its path.
    fn write_temp_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("restdocs_easy_cli_test_{name}"));
        std::fs::write(&path, content).unwrap();
        path
    }

    fn describe_args(catalog: PathBuf, flavor: Flavor, format: Format) -> DescribeArgs {
        DescribeArgs {
            catalog,
            shape: "Login".to_string(),
            config: None,
            prefix: None,
            groups: Vec::new(),
            flavor,
            format,
        }
    }

    #[test]
    fn describe_fields_as_yaml() {
        let catalog = write_temp_file("fields_yaml.yaml", CATALOG);
        let output = describe(&describe_args(catalog, Flavor::Fields, Format::Yaml)).unwrap();

        assert!(output.contains("path: email"), "output: {output}");
        assert!(output.contains("type: STRING"));
        assert!(output.contains("type: BOOLEAN"));
        assert!(output.contains("value: Must not be blank"));
        assert!(!output.contains("secret"), "field without accessor is skipped");
    }

    #[test]
    fn describe_fields_as_json() {
        let catalog = write_temp_file("fields_json.yaml", CATALOG);
        let output = describe(&describe_args(catalog, Flavor::Fields, Format::Json)).unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        let paths: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|field| field["path"].as_str().unwrap())
            .collect();
        assert_eq!(paths, vec!["email", "remember"]);
        assert_eq!(json[0]["type"], "STRING");
        assert_eq!(json[0]["optional"], false);
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn describe_headers_with_prefix() {
        let catalog = write_temp_file("headers.yaml", CATALOG);
        let mut args = describe_args(catalog, Flavor::Headers, Format::Yaml);
        args.prefix = Some("X-".to_string());
        let output = describe(&args).unwrap();

        assert!(output.contains("name: X-email"), "output: {output}");
        assert!(!output.contains("type:"), "headers carry no type");

        args.format = Format::Json;
        let json: serde_json::Value = serde_json::from_str(&describe(&args).unwrap()).unwrap();
        assert_eq!(json[1]["name"], "X-remember");
    }

    #[test]
    fn describe_unknown_shape_errors() {
        let catalog = write_temp_file("unknown.yaml", CATALOG);
        let mut args = describe_args(catalog, Flavor::Fields, Format::Yaml);
        args.shape = "Missing".to_string();

        let err = describe(&args).unwrap_err();
        assert!(err.to_string().contains("Missing"));
    }

    #[test]
    fn describe_missing_catalog_errors() {
        let args = describe_args(PathBuf::from("nonexistent.yaml"), Flavor::Fields, Format::Yaml);
        let err = describe(&args).unwrap_err();
        assert!(err.to_string().contains("Failed to load catalog"));
    }

    #[test]
    fn shapes_listing() {
        let catalog = ShapeCatalog::from_yaml(CATALOG).unwrap();
        let mut out = Vec::new();
        list_shapes(&catalog, &mut out).unwrap();

        let listing = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(
            lines,
            vec![
                "com.example.Level (Enum): level",
                "com.example.Login (Class): email, remember",
            ]
        );
    }

    #[test]
    fn parses_describe_flags() {
        let cli = Cli::try_parse_from([
            "restdocs-easy",
            "describe",
            "--catalog",
            "shapes.yaml",
            "-s",
            "Login",
            "-g",
            "Create",
            "-g",
            "Update",
            "--as",
            "cookies",
            "--format",
            "json",
        ])
        .unwrap();

        let Cli::Describe(args) = cli else {
            panic!("expected describe");
        };
        assert_eq!(args.groups, vec!["Create", "Update"]);
        assert!(matches!(args.flavor, Flavor::Cookies));
        assert!(matches!(args.format, Format::Json));
    }
}
