use anyhow::Context;
use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

mod args;

use args::{Cli, Format};
use ginza_report::{
    anchor_key, BatchDriver, Document, HeadingLevel, Page, ReportConfig, ReportError, ReportResult,
    RunOptions, RunSummary, Surface, Toc,
};
use ginza_report_conllu::{parse_documents, ConlluOptions, GinzaCommand};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let config = match &cli.config {
        Some(path) => ReportConfig::load(path)?,
        None => ReportConfig::default(),
    };
    let input = read_input(&cli)?;

    let (page, result) = build_report(&cli, &config, &input);

    // The page is written even when the run failed part way.
    write_output(&page, cli.format, cli.output.as_deref())?;
    let summary = result.context("report generation failed")?;

    tracing::info!(
        blocks = summary.blocks,
        sentences = summary.sentences,
        headings = summary.headings,
        "report written"
    );
    Ok(())
}

fn init_logging(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn read_input(cli: &Cli) -> anyhow::Result<String> {
    match cli.input_path() {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

/// Run the report into a fresh page. The page is returned with whatever was
/// written before a failure.
fn build_report(cli: &Cli, config: &ReportConfig, input: &str) -> (Page, ReportResult<RunSummary>) {
    let mut page = Page::new().with_title(config.title.as_str());
    if let Some(url) = &config.renderer {
        page = page.with_renderer(url.as_str());
    }
    let mut toc = Toc::new();
    toc.bind(&mut page, config.navigation.region);
    page.heading(HeadingLevel::H1, &anchor_key(&config.title), &config.title);

    let driver = BatchDriver::new(config);
    let options = RunOptions {
        ignore_line_breaks: cli.ignore_line_breaks,
    };
    let conllu = ConlluOptions {
        lang: config.lang.clone(),
    };

    let result = if cli.conllu {
        render_conllu(&driver, input, options, &conllu, &mut page, &mut toc)
    } else {
        let ginza = GinzaCommand::new()
            .with_program(cli.ginza.as_str())
            .with_args(cli.ginza_args())
            .with_options(conllu);
        driver.run(input, options, &ginza, &mut page, &mut toc)
    };

    (page, result)
}

fn render_conllu(
    driver: &BatchDriver,
    input: &str,
    options: RunOptions,
    conllu: &ConlluOptions,
    page: &mut Page,
    toc: &mut Toc,
) -> ReportResult<RunSummary> {
    let mut documents = parse_documents(input, conllu).map_err(|source| ReportError::Annotate {
        block: 1,
        source: source.into(),
    })?;
    if options.ignore_line_breaks {
        documents = vec![Document::merge(documents)];
    }
    driver.render_documents(&documents, page, toc)
}

fn write_output(page: &Page, format: Format, output: Option<&Path>) -> anyhow::Result<()> {
    let rendered = match format {
        Format::Html => page.to_html(),
        Format::Text => page.to_text(),
    };

    match output {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("failed to write {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .context("failed to write stdout")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ginza_report::{Block, Region};

    const SAMPLE: &str = "\
# newdoc id = 1
# text = 猫が鳴く。
1\t猫\t猫\tNOUN\t名詞-普通名詞-一般\t_\t3\tnsubj\t_\tSpaceAfter=No|BunsetuBILabel=B|BunsetuPositionType=SEM_HEAD|Reading=ネコ
2\tが\tが\tADP\t助詞-格助詞\t_\t1\tcase\t_\tSpaceAfter=No|BunsetuBILabel=I|BunsetuPositionType=SYN_HEAD|Reading=ガ
3\t鳴く\t鳴く\tVERB\t動詞-一般\t_\t0\troot\t_\tSpaceAfter=No|BunsetuBILabel=B|BunsetuPositionType=ROOT|Inf=五段-カ行,終止形-一般|Reading=ナク
4\t。\t。\tPUNCT\t補助記号-句点\t_\t3\tpunct\t_\tSpaceAfter=No|BunsetuBILabel=I|BunsetuPositionType=CONT|Reading=。

# newdoc id = 2
# text = 犬。
1\t犬\t犬\tNOUN\t名詞-普通名詞-一般\t_\t0\troot\t_\tSpaceAfter=No|BunsetuBILabel=B|BunsetuPositionType=ROOT|Reading=イヌ
2\t。\t。\tPUNCT\t補助記号-句点\t_\t1\tpunct\t_\tSpaceAfter=No|BunsetuBILabel=I|BunsetuPositionType=CONT|Reading=。
";

    fn headings(page: &Page) -> Vec<&str> {
        page.blocks(Region::Main)
            .iter()
            .filter_map(|block| match block {
                Block::Heading { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_conllu_report() {
        let cli = Cli::try_parse_from(["ginza-report", "--conllu"]).unwrap();
        let (page, result) = build_report(&cli, &ReportConfig::default(), SAMPLE);

        let summary = result.unwrap();
        assert_eq!(summary.blocks, 2);
        assert_eq!(summary.headings, 2);
        assert_eq!(
            headings(&page),
            vec!["GiNZA NLP Library", "1-1. 猫が鳴く。", "2-1. 犬。"]
        );
        assert_eq!(page.slot_in(Region::Sidebar).unwrap().len(), 2);
    }

    #[test]
    fn test_conllu_ignore_line_breaks() {
        let cli =
            Cli::try_parse_from(["ginza-report", "--conllu", "--ignore-line-breaks"]).unwrap();
        let (page, result) = build_report(&cli, &ReportConfig::default(), SAMPLE);

        assert_eq!(result.unwrap().blocks, 1);
        assert_eq!(
            headings(&page),
            vec!["GiNZA NLP Library", "1-1. 猫が鳴く。", "1-2. 犬。"]
        );
    }

    #[test]
    fn test_missing_annotator_keeps_partial_page() {
        let cli = Cli::try_parse_from(["ginza-report", "--ginza", "ginza-report-missing-program"])
            .unwrap();
        let (page, result) = build_report(&cli, &ReportConfig::default(), "猫が鳴く。");

        assert!(result.is_err());
        assert_eq!(headings(&page), vec!["GiNZA NLP Library"]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.html");
        write_output(&page, Format::Html, Some(path.as_path())).unwrap();
        let html = fs::read_to_string(&path).unwrap();
        assert!(html.contains("<h1 id='ginzanlplibrary'>GiNZA NLP Library</h1>"));
    }

    #[test]
    fn test_configured_renderer_is_loaded() {
        let cli = Cli::try_parse_from(["ginza-report", "--conllu"]).unwrap();
        let mut config = ReportConfig::default();
        config.renderer = Some("js/displacy.js".to_string());
        let (page, result) = build_report(&cli, &config, SAMPLE);

        result.unwrap();
        assert!(page
            .to_html()
            .contains("<script src=\"js/displacy.js\"></script>"));
    }

    #[test]
    fn test_navigation_in_main() {
        let cli = Cli::try_parse_from(["ginza-report", "--conllu"]).unwrap();
        let mut config = ReportConfig::default();
        config.navigation.region = Region::Main;
        let (page, _) = build_report(&cli, &config, SAMPLE);

        assert!(page.slot_in(Region::Sidebar).is_none());
        assert_eq!(page.slot_in(Region::Main).unwrap().len(), 2);
    }
}
