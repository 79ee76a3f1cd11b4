use clap::Parser;
use daterange_picker::compare::RangeUpdate;
use daterange_picker::range_picker::DateRangePicker;
use daterange_picker::terminal::{KeyCode, KeyModifiers, Terminal, TerminalEvent};
use daterange_picker::widgets::traits::{Drawable, Interactive, RenderContext, WidgetAction};
use daterange_picker::{PickerConfig, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "daterange-picker")]
#[command(version, about = "Pick a date range and print it as JSON", long_about = None)]
struct Cli {
    /// Path to a YAML picker configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// First day of the range (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,

    /// Last day of the range (YYYY-MM-DD), defaults to --from
    #[arg(long)]
    to: Option<String>,

    /// Start with the compare range switched on
    #[arg(long)]
    compare: bool,

    /// Hide the compare toggle
    #[arg(long, conflicts_with = "compare")]
    no_compare: bool,

    /// Days between the range and its compare range
    #[arg(long)]
    offset_days: Option<i64>,
}

impl Cli {
    fn picker_config(&self) -> Result<PickerConfig> {
        let mut config = match &self.config {
            Some(path) => PickerConfig::load(path)?,
            None => PickerConfig::default(),
        };
        if self.from.is_some() {
            config.initial_date_from = self.from.clone();
            config.initial_date_to = self.to.clone();
        } else if self.to.is_some() {
            config.initial_date_to = self.to.clone();
        }
        if self.no_compare {
            config.show_compare = false;
        }
        if let Some(days) = self.offset_days {
            config.compare_offset_days = days;
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(Some(update)) => match serde_json::to_string_pretty(&update) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", daterange_picker::Error::from(e));
                ExitCode::FAILURE
            }
        },
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Option<RangeUpdate>> {
    let config = cli.picker_config()?;
    debug!("picker config: {:?}", config);

    let mut picker = DateRangePicker::new("range", "Date range", &config)?;
    if cli.compare {
        picker.set_compare(true);
    }
    picker.open();

    let mut terminal = Terminal::new()?;
    terminal.enter_raw_mode()?;

    let result = match terminal.set_line_wrap(false) {
        Ok(()) => event_loop(&mut terminal, &mut picker),
        Err(err) => Err(err.into()),
    };
    let restored = terminal.restore();

    let update = result?;
    restored?;
    Ok(update)
}

fn event_loop(terminal: &mut Terminal, picker: &mut DateRangePicker) -> Result<Option<RangeUpdate>> {
    let ctx = RenderContext::focused(picker.id());
    let mut update = None;
    render(terminal, picker, &ctx)?;

    loop {
        if !terminal.poll(Duration::from_millis(250))? {
            continue;
        }

        match terminal.read_event()? {
            TerminalEvent::Key(key) => {
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    info!("interrupted");
                    return Ok(None);
                }

                let result = picker.on_key(key);
                for action in result.actions {
                    match action {
                        WidgetAction::RangeUpdated(next) => update = Some(next),
                        WidgetAction::Closed | WidgetAction::Cancelled => return Ok(update),
                        WidgetAction::DateChanged { .. } => {}
                    }
                }
                if result.request_render {
                    render(terminal, picker, &ctx)?;
                }
            }
            TerminalEvent::Resize { .. } => render(terminal, picker, &ctx)?,
        }
    }
}

fn render(terminal: &mut Terminal, picker: &DateRangePicker, ctx: &RenderContext) -> Result<()> {
    let output = picker.draw(ctx);
    let cursor = output.cursor.map(|pos| (pos.col, pos.row));
    terminal.draw(&output.lines, cursor)?;
    Ok(())
}
