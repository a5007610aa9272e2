//! Command-line interface for the scentwheel utility
//!
//! Renders perfume note relationship wheels from a catalog JSON file as SVG
//! or as a terminal preview, and answers catalog queries.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::colorizer::colorize_canvas;
use scentwheel::core::logging::{init_logging, resolve_level_or};
use scentwheel::render::{AsciiRenderer, SvgRenderer};
use scentwheel::{Catalog, Category, Database, Renderer, Scene, Viewport, DEFAULT_RELATED_LIMIT};

/// Scentwheel - radial relationship wheels for perfume notes
#[derive(Parser)]
#[command(name = "scentwheel")]
#[command(about = "Render perfume note relationship wheels as SVG or terminal previews")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error) [default: warn]
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Set log format (compact|pretty|json) [default: compact]
    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// Category symbol accepted on the command line
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum CategoryChoice {
    #[value(name = "SP", alias = "sp")]
    Sp,
    #[value(name = "SU", alias = "su")]
    Su,
    #[value(name = "AU", alias = "au")]
    Au,
    #[value(name = "WI", alias = "wi")]
    Wi,
}

impl From<CategoryChoice> for Category {
    fn from(value: CategoryChoice) -> Self {
        match value {
            CategoryChoice::Sp => Category::Spring,
            CategoryChoice::Su => Category::Summer,
            CategoryChoice::Au => Category::Autumn,
            CategoryChoice::Wi => Category::Winter,
        }
    }
}

/// Output format of the render command
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// SVG markup
    #[default]
    Svg,
    /// Character preview for terminals
    Ascii,
}

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the wheel for one category
    Render {
        /// Catalog JSON file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Active category
        #[arg(short, long, value_enum, default_value_t = CategoryChoice::Sp)]
        category: CategoryChoice,

        /// Container width in pixels
        #[arg(long, default_value_t = 1200.0)]
        width: f64,

        /// Container height in pixels
        #[arg(long, default_value_t = 900.0)]
        height: f64,

        /// Selected item id; its curves are emphasized
        #[arg(short, long)]
        select: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
        format: OutputFormat,

        /// Preview width in columns (ascii format only)
        #[arg(long, default_value_t = scentwheel::render::DEFAULT_COLUMNS)]
        columns: usize,

        /// When to use colors in the ascii preview
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,
    },

    /// Summarize a catalog
    Inspect {
        /// Catalog JSON file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Category whose relations are counted
        #[arg(short, long, value_enum, default_value_t = CategoryChoice::Sp)]
        category: CategoryChoice,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },

    /// List recipes involving the selected item
    Related {
        /// Catalog JSON file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Active category
        #[arg(short, long, value_enum, default_value_t = CategoryChoice::Sp)]
        category: CategoryChoice,

        /// Selected item id
        #[arg(short, long)]
        select: String,

        /// Only recipes with an ingredient whose name contains this text
        #[arg(long, default_value = "")]
        search: String,

        /// Maximum number of recipes
        #[arg(long, default_value_t = DEFAULT_RELATED_LIMIT)]
        limit: usize,
    },

    /// Show the category symbols
    Categories {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Catalog summary printed by `inspect`
#[derive(Debug, Serialize, PartialEq)]
pub struct CatalogSummary {
    pub items: usize,
    pub per_category: Vec<(String, usize)>,
    pub uncategorized: Vec<String>,
    pub category: String,
    pub relations: usize,
    pub drawable: usize,
    pub skipped: usize,
}

impl CatalogSummary {
    pub fn new(catalog: &Catalog, category: Category) -> Self {
        let in_category = catalog
            .relations()
            .iter()
            .filter(|relation| relation.is_in(category))
            .count();
        let drawable = catalog.drawable_relations(category).count();
        Self {
            items: catalog.node_count(),
            per_category: Category::ALL
                .iter()
                .map(|c| (c.symbol().to_string(), catalog.items_in(*c).count()))
                .collect(),
            uncategorized: catalog.uncategorized().map(|item| item.id.clone()).collect(),
            category: category.symbol().to_string(),
            relations: catalog.edge_count(),
            drawable,
            skipped: in_category - drawable,
        }
    }
}

/// Level used when neither a flag nor the environment sets one
pub const CLI_DEFAULT_LEVEL: &str = "warn";

/// Main CLI application
#[derive(Default)]
pub struct ScentwheelApp {
    verbose: bool,
}

impl ScentwheelApp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Level directive and format for the subscriber
    ///
    /// Flags win; otherwise the library's environment lookup applies, ending
    /// at [`CLI_DEFAULT_LEVEL`] and the compact format.
    pub fn log_settings(cli: &Cli) -> (String, Option<&'static str>) {
        let level = resolve_level_or(cli.log_level.map(|l| l.as_str()), CLI_DEFAULT_LEVEL);
        (level, cli.log_format.map(|f| f.as_str()))
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        let (log_level, log_format) = Self::log_settings(&cli);
        if let Err(e) = init_logging(Some(&log_level), log_format) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        self.verbose = cli.verbose;
        if self.verbose {
            eprintln!("Scentwheel v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Render {
                input,
                output,
                category,
                width,
                height,
                select,
                format,
                columns,
                color,
            } => {
                let catalog = self.load_catalog(input)?;
                let rendered = self.render(
                    &catalog,
                    category.into(),
                    Viewport::new(width, height),
                    select.as_deref(),
                    format,
                    columns,
                    Self::should_colorize(&output, color),
                )?;
                self.write_output(output, &rendered)
            }
            Commands::Inspect {
                input,
                category,
                json,
            } => {
                let catalog = self.load_catalog(input)?;
                let summary = CatalogSummary::new(&catalog, category.into());
                println!("{}", Self::format_summary(&summary, json)?);
                Ok(())
            }
            Commands::Related {
                input,
                category,
                select,
                search,
                limit,
            } => {
                let catalog = self.load_catalog(input)?;
                let lines = Self::related_lines(&catalog, category.into(), &select, &search, limit)?;
                for line in lines {
                    println!("{}", line);
                }
                Ok(())
            }
            Commands::Categories { json } => {
                println!("{}", Self::categories_text(json)?);
                Ok(())
            }
        }
    }

    fn load_catalog(&self, input: Option<PathBuf>) -> Result<Catalog> {
        let content = self.read_input(input)?;
        if self.verbose {
            eprintln!("Read {} bytes of input", content.len());
        }
        Catalog::from_json(&content)
    }

    /// Render the wheel in the requested format
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &self,
        catalog: &Catalog,
        category: Category,
        viewport: Viewport,
        selection: Option<&str>,
        format: OutputFormat,
        columns: usize,
        colorize: bool,
    ) -> Result<String> {
        if !viewport.is_measurable() {
            return Err(anyhow!(
                "Invalid container size {}x{}",
                viewport.width,
                viewport.height
            ));
        }
        if let Some(selected) = selection {
            if !catalog.has_item(selected) {
                // the wheel still renders, nothing gets emphasized
                eprintln!("Warning: selected item '{}' is not in the catalog", selected);
            }
        }

        let mut scene = Scene::build(catalog, category, viewport);
        let emphasized = scene.apply_selection(selection);
        info!(
            category = %category,
            curves = scene.curves().len(),
            emphasized,
            "Wheel ready"
        );
        if self.verbose {
            eprintln!(
                "Drew {} labels and {} curves ({} skipped)",
                scene.labels().len(),
                scene.curves().len(),
                scene.skipped_relations()
            );
        }

        match format {
            OutputFormat::Svg => SvgRenderer::new().render(&scene),
            OutputFormat::Ascii => {
                let canvas = AsciiRenderer::with_columns(columns).render(&scene)?;
                if colorize {
                    Ok(colorize_canvas(&canvas))
                } else {
                    Ok(canvas.to_string())
                }
            }
        }
    }

    fn format_summary(summary: &CatalogSummary, json: bool) -> Result<String> {
        if json {
            return Ok(serde_json::to_string_pretty(summary)?);
        }
        let mut out = format!("Items: {}\n", summary.items);
        for (symbol, count) in &summary.per_category {
            out.push_str(&format!("  {:<4}{}\n", symbol, count));
        }
        if !summary.uncategorized.is_empty() {
            out.push_str(&format!(
                "  not drawn: {}\n",
                summary.uncategorized.join(", ")
            ));
        }
        out.push_str(&format!("Relations: {}\n", summary.relations));
        out.push_str(&format!(
            "  {}: {} drawn, {} skipped",
            summary.category, summary.drawable, summary.skipped
        ));
        Ok(out)
    }

    /// One line per related recipe: the pair, then its ingredients
    pub fn related_lines(
        catalog: &Catalog,
        category: Category,
        selected: &str,
        search: &str,
        limit: usize,
    ) -> Result<Vec<String>> {
        if !catalog.has_item(selected) {
            return Err(anyhow!("Unknown item '{}'", selected));
        }
        let related = catalog.related(category, Some(selected), search, limit);
        debug!(count = related.len(), "Related recipes");
        if related.is_empty() {
            return Ok(vec!["No related recipes".to_string()]);
        }
        Ok(related
            .iter()
            .map(|relation| {
                let ingredients: Vec<&str> = relation
                    .ingredients
                    .iter()
                    .map(|ingredient| ingredient.name.as_str())
                    .collect();
                if ingredients.is_empty() {
                    format!("{} + {}", relation.source(), relation.target())
                } else {
                    format!(
                        "{} + {}: {}",
                        relation.source(),
                        relation.target(),
                        ingredients.join(", ")
                    )
                }
            })
            .collect())
    }

    fn categories_text(json: bool) -> Result<String> {
        if json {
            let categories: Vec<serde_json::Value> = Category::ALL
                .iter()
                .map(|c| serde_json::json!({ "symbol": c.symbol(), "name": format!("{:?}", c) }))
                .collect();
            return Ok(serde_json::to_string_pretty(&categories)?);
        }
        Ok(Category::ALL
            .iter()
            .map(|c| format!("{}  {:?}", c.symbol(), c))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    /// Determine if we should colorize the output based on color choice and output destination
    fn should_colorize(output: &Option<PathBuf>, color: ColorChoice) -> bool {
        match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                match output {
                    None => crossterm::tty::IsTty::is_tty(&std::io::stdout()),
                    Some(p) if p.to_str() == Some("-") => {
                        crossterm::tty::IsTty::is_tty(&std::io::stdout())
                    }
                    Some(_) => false,
                }
            }
        }
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
                if self.verbose {
                    eprintln!("Wrote {}", path.display());
                }
            }
            _ => {
                let mut stdout = io::stdout();
                if content.is_empty() || content.ends_with('\n') {
                    write!(stdout, "{}", content)?;
                } else {
                    writeln!(stdout, "{}", content)?;
                }
                stdout.flush()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use scentwheel::{Ingredient, Item, Relation};
    use std::fs;
    use tempfile::tempdir;

    const CATALOG: &str = r#"{
        "items": [
            { "id": "Rose", "name": "Rose Absolute", "category": "SP" },
            { "id": "Neroli", "name": "Neroli", "category": "SP" },
            { "id": "Oud", "name": "Agarwood", "category": "WI" },
            { "id": "Ghost", "name": "Ghost", "category": "XX" }
        ],
        "relations": [
            { "ids": ["Rose", "Neroli"], "category": "SP",
              "ingredients": [{ "id": "i1", "name": "Bergamot" }] },
            { "ids": ["Rose", "Oud"], "category": "SP" },
            { "ids": ["Rose", "Ghost"], "category": "SP" },
            { "ids": ["Neroli", "Oud"], "category": "WI" }
        ]
    }"#;

    fn catalog() -> Catalog {
        Catalog::from_json(CATALOG).unwrap()
    }

    #[test]
    fn test_cli_parsing_render_command() {
        let args = vec![
            "scentwheel",
            "render",
            "--input",
            "notes.json",
            "--output",
            "wheel.svg",
            "--category",
            "WI",
            "--select",
            "Oud",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Render {
                input,
                output,
                category,
                width,
                height,
                select,
                format,
                color,
                ..
            } => {
                assert_eq!(input.unwrap().to_string_lossy(), "notes.json");
                assert_eq!(output.unwrap().to_string_lossy(), "wheel.svg");
                assert_eq!(category, CategoryChoice::Wi);
                assert_eq!(width, 1200.0);
                assert_eq!(height, 900.0);
                assert_eq!(select.as_deref(), Some("Oud"));
                assert_eq!(format, OutputFormat::Svg);
                assert_eq!(color, ColorChoice::Auto);
            }
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_cli_parsing_lowercase_category() {
        let cli = Cli::try_parse_from(["scentwheel", "render", "-c", "au"]).unwrap();
        match cli.command {
            Commands::Render { category, .. } => assert_eq!(category, CategoryChoice::Au),
            _ => panic!("Expected Render command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_category() {
        assert!(Cli::try_parse_from(["scentwheel", "render", "--category", "XX"]).is_err());
    }

    #[test]
    fn test_cli_parsing_related_command() {
        let args = vec!["scentwheel", "related", "--select", "Rose", "--search", "berg"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Related {
                select,
                search,
                limit,
                ..
            } => {
                assert_eq!(select, "Rose");
                assert_eq!(search, "berg");
                assert_eq!(limit, 10);
            }
            _ => panic!("Expected Related command"),
        }
    }

    #[test]
    fn test_verbose_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["scentwheel", "categories", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_log_flags_beat_environment() {
        let cli = Cli::try_parse_from([
            "scentwheel",
            "categories",
            "--log-level",
            "debug",
            "--log-format",
            "json",
        ])
        .unwrap();
        let (level, format) = ScentwheelApp::log_settings(&cli);
        assert_eq!(level, "debug");
        assert_eq!(format, Some("json"));
    }

    #[test]
    fn test_log_format_defers_to_library_without_flag() {
        let cli = Cli::try_parse_from(["scentwheel", "categories"]).unwrap();
        let (_, format) = ScentwheelApp::log_settings(&cli);
        assert_eq!(format, None);
    }

    #[test]
    fn test_render_svg() {
        let app = ScentwheelApp::new();
        let svg = app
            .render(
                &catalog(),
                Category::Spring,
                Viewport::new(1200.0, 900.0),
                Some("Oud"),
                OutputFormat::Svg,
                80,
                false,
            )
            .unwrap();
        assert_eq!(svg.matches("<path").count(), 2);
        assert_eq!(svg.matches("link active").count(), 1);
        assert!(!svg.contains(">Ghost<"));
    }

    #[test]
    fn test_render_ascii_plain() {
        let app = ScentwheelApp::new();
        let text = app
            .render(
                &catalog(),
                Category::Winter,
                Viewport::new(800.0, 800.0),
                None,
                OutputFormat::Ascii,
                80,
                false,
            )
            .unwrap();
        assert!(text.contains("Oud"));
        assert!(!text.contains('\x1b'));
    }

    #[test]
    fn test_render_rejects_zero_size() {
        let app = ScentwheelApp::new();
        let result = app.render(
            &catalog(),
            Category::Spring,
            Viewport::new(0.0, 900.0),
            None,
            OutputFormat::Svg,
            80,
            false,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_catalog_summary() {
        let summary = CatalogSummary::new(&catalog(), Category::Spring);
        assert_eq!(summary.items, 4);
        assert_eq!(summary.per_category[0], ("SP".to_string(), 2));
        assert_eq!(summary.per_category[3], ("WI".to_string(), 1));
        assert_eq!(summary.uncategorized, vec!["Ghost".to_string()]);
        assert_eq!(summary.relations, 4);
        assert_eq!(summary.drawable, 2);
        assert_eq!(summary.skipped, 1);

        let text = ScentwheelApp::format_summary(&summary, false).unwrap();
        assert!(text.contains("SP: 2 drawn, 1 skipped"));
        let json = ScentwheelApp::format_summary(&summary, true).unwrap();
        assert!(json.contains("\"drawable\": 2"));
    }

    #[test]
    fn test_related_lines() {
        let lines =
            ScentwheelApp::related_lines(&catalog(), Category::Spring, "Rose", "", 10).unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Rose + Neroli: Bergamot");

        let searched =
            ScentwheelApp::related_lines(&catalog(), Category::Spring, "Rose", "BERG", 10).unwrap();
        assert_eq!(searched, vec!["Rose + Neroli: Bergamot".to_string()]);

        let none =
            ScentwheelApp::related_lines(&catalog(), Category::Autumn, "Rose", "", 10).unwrap();
        assert_eq!(none, vec!["No related recipes".to_string()]);

        assert!(ScentwheelApp::related_lines(&catalog(), Category::Spring, "Musk", "", 10).is_err());
    }

    #[test]
    fn test_related_respects_limit() {
        let items = (0..15)
            .map(|i| Item::new(format!("N{i}"), format!("Note {i}"), Category::Summer))
            .collect();
        let relations = (1..15)
            .map(|i| {
                Relation::new("N0", format!("N{i}"), Category::Summer)
                    .with_ingredients(vec![Ingredient::new("x", "Musk")])
            })
            .collect();
        let catalog = Catalog::from_parts(items, relations).unwrap();
        let lines = ScentwheelApp::related_lines(
            &catalog,
            Category::Summer,
            "N0",
            "",
            DEFAULT_RELATED_LIMIT,
        )
        .unwrap();
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn test_categories_text() {
        let text = ScentwheelApp::categories_text(false).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert!(text.starts_with("SP"));
        let json = ScentwheelApp::categories_text(true).unwrap();
        assert!(json.contains("\"symbol\": \"WI\""));
    }

    #[test]
    fn test_read_input_from_file() {
        let app = ScentwheelApp::new();
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("notes.json");
        fs::write(&file_path, CATALOG).unwrap();

        let content = app.read_input(Some(file_path)).unwrap();
        assert_eq!(content, CATALOG);
    }

    #[test]
    fn test_read_input_missing_file() {
        let app = ScentwheelApp::new();
        let dir = tempdir().unwrap();
        let result = app.read_input(Some(dir.path().join("missing.json")));
        assert!(result.unwrap_err().to_string().contains("Failed to read input file"));
    }

    #[test]
    fn test_write_output_to_file() {
        let app = ScentwheelApp::new();
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("wheel.svg");

        app.write_output(Some(file_path.clone()), "<svg/>").unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "<svg/>");
    }
}
