//! The `seavision take` command: one quiz, interactively, over stdin.
//!
//! Stepwise quizzes read one answer per line. `:back`, `:skip` and `:quit`
//! navigate; the chart quiz also takes `:mode <day|dusk|night>`. Arrangement
//! tasks take `move <id> <slot>`, `shuffle` and `done`.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::Rng;

use seavision_core::catalog::{self, ChartElement, DisplayMode, ProbeStimulus, RadarProbe};
use seavision_core::config::{load_config_from, SeavisionConfig};
use seavision_core::engine::{ArrangementSession, ChartQuiz, QuizSession, RadarBattery};
use seavision_core::error::QuizError;
use seavision_core::model::{ItemId, QuizKind};
use seavision_core::report::{QuizOutcome, SessionReport};
use seavision_core::scoring::{
    ChartScorer, HueScorer, IshiharaScorer, LanternResponse, LanternScorer, RadarResponse,
    RadarScorer, ScoreResult,
};
use seavision_core::sequence::SequenceOrder;
use seavision_core::traits::Scorer;

use super::render;

pub fn execute(
    quiz: QuizKind,
    seed: Option<u64>,
    participant: Option<String>,
    config_path: Option<PathBuf>,
    output: Option<PathBuf>,
    save: bool,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;
    if seed.is_some() {
        config.seed = seed;
    }
    if participant.is_some() {
        config.participant = participant;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut term = Terminal::new(stdin.lock(), stdout.lock());
    let Some((source, result)) = run_quiz(quiz, &config, &mut term)? else {
        return Ok(());
    };
    drop(term);

    render::print_result(&result);

    if save || output.is_some() {
        let dir = output.unwrap_or_else(|| config.output_dir.clone());
        let mut report = SessionReport::new(config.participant.clone());
        report.push(QuizOutcome::new(source, result));
        let path = dir.join(format!("{quiz}-{}.json", report.id));
        report.save_json(&path)?;
        println!("\nReport saved to {}", path.display());
    }

    Ok(())
}

/// Runs `quiz` to the end or until the participant quits. Returns the source
/// label and score, or `None` when there is nothing to score.
fn run_quiz<R: BufRead, W: Write>(
    quiz: QuizKind,
    config: &SeavisionConfig,
    term: &mut Terminal<R, W>,
) -> Result<Option<(String, ScoreResult)>> {
    let mut rng = config.rng();
    let policy = config.thresholds.clone();

    term.say(format!("{}\n", quiz.title()))?;
    match quiz {
        QuizKind::Ishihara => {
            let mut session = QuizSession::start(
                IshiharaScorer::new(policy),
                config.ishihara_catalog()?,
                SequenceOrder::Canonical,
                &mut rng,
            )?;
            term.say("Type the number you see on each plate. Leave blank if you see none.")?;
            run_steps(
                &mut session,
                term,
                |plate, pos, len| format!("[{pos}/{len}] plate {}", plate.number),
                |_, raw| Ok(raw.trim().to_string()),
            )?;
            Ok(Some((session.id().to_string(), session.score()?)))
        }
        QuizKind::Lantern => {
            let mut session = QuizSession::start(
                LanternScorer::new(policy),
                catalog::lantern(),
                SequenceOrder::Shuffled,
                &mut rng,
            )?;
            term.say("Name both lights, left then right (red, green, yellow, white).")?;
            run_steps(
                &mut session,
                term,
                |pair, pos, len| {
                    format!("[{pos}/{len}] lights {} {}", pair.first.hex(), pair.second.hex())
                },
                |_, raw| raw.parse::<LanternResponse>(),
            )?;
            Ok(Some((session.id().to_string(), session.score()?)))
        }
        QuizKind::Chart => {
            let mut chart = ChartQuiz::start(ChartScorer::new(policy), catalog::chart(), &mut rng)?;
            run_chart(&mut chart, term)?;
            Ok(Some((chart.session().id().to_string(), chart.score()?)))
        }
        QuizKind::Hue => {
            let mut session = ArrangementSession::start(config.hue.set.catalog(), &mut rng)?;
            term.say(format!(
                "Arrange the {} swatches from first to last hue.",
                config.hue.set
            ))?;
            run_arrangement(&mut session, term, &mut rng)?;
            if !session.is_complete() {
                term.say("Arrangement not completed; nothing to score.")?;
                return Ok(None);
            }
            let scorer = HueScorer::new(config.hue.mode(), policy);
            Ok(Some((session.id().to_string(), session.score(&scorer)?)))
        }
        QuizKind::Radar => {
            let mut battery = RadarBattery::start(
                RadarScorer::new(policy),
                catalog::radar_probes(),
                catalog::radar_intensity_scale(),
                &mut rng,
            )?;
            term.say("Answer yes or no, or give a count where asked.")?;
            let mut sweep_rng = config.rng();
            let finished = run_steps(
                battery.probes_mut(),
                term,
                |probe, pos, len| format!("[{pos}/{len}] {}", probe_prompt(probe, &mut sweep_rng)),
                RadarResponse::parse_for,
            )?;
            if finished {
                term.say("\nNow order the echo intensities from weakest to strongest.")?;
                run_arrangement(battery.ordering_mut(), term, &mut rng)?;
            }
            Ok(Some((battery.id().to_string(), battery.score()?)))
        }
    }
}

// ---------------------------------------------------------------------------
// Terminal I/O
// ---------------------------------------------------------------------------

struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Prompt and read one line. `None` at end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt} > ")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Step {
    Back,
    Skip,
    Quit,
    Mode(String),
    Answer(String),
}

fn parse_step(line: &str) -> Step {
    match line.trim() {
        ":back" | ":b" => Step::Back,
        ":skip" | ":s" => Step::Skip,
        ":quit" | ":q" => Step::Quit,
        other => match other.strip_prefix(":mode") {
            Some(mode) => Step::Mode(mode.trim().to_string()),
            None => Step::Answer(line.to_string()),
        },
    }
}

/// Report an input error and carry on, or propagate anything else.
fn recover<T, R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    outcome: Result<T, QuizError>,
) -> Result<Option<T>> {
    match outcome {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_input_error() => {
            term.say(format!("  {e}"))?;
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

// ---------------------------------------------------------------------------
// Stepwise quizzes
// ---------------------------------------------------------------------------

/// Walk the session until it completes. Returns `false` if the participant
/// quit or input ran out first.
fn run_steps<S, R, W, P, F>(
    session: &mut QuizSession<S>,
    term: &mut Terminal<R, W>,
    mut prompt: P,
    parse: F,
) -> Result<bool>
where
    S: Scorer,
    R: BufRead,
    W: Write,
    P: FnMut(&S::Item, usize, usize) -> String,
    F: Fn(&S::Item, &str) -> Result<S::Response, QuizError>,
{
    loop {
        let text = match session.current_item() {
            Some(item) => prompt(item, session.position() + 1, session.len()),
            None => return Ok(true),
        };
        let Some(line) = term.ask(&text)? else {
            return Ok(false);
        };
        match parse_step(&line) {
            Step::Quit => return Ok(false),
            Step::Back => {
                if !session.retreat() {
                    term.say("  already at the first item")?;
                }
            }
            Step::Skip => {
                session.skip();
            }
            Step::Mode(_) => term.say("  display modes only apply to the chart quiz")?,
            Step::Answer(raw) => {
                let parsed = match session.current_item() {
                    Some(item) => parse(item, &raw),
                    None => return Ok(true),
                };
                if let Some(response) = recover(term, parsed)? {
                    recover(term, session.submit(response))?;
                }
            }
        }
    }
}

/// Options are shown as colour samples from the active palette; the answer
/// is the option number or the element name.
fn run_chart<R: BufRead, W: Write>(quiz: &mut ChartQuiz, term: &mut Terminal<R, W>) -> Result<()> {
    loop {
        let session = quiz.session();
        let Some(question) = session.current_item() else {
            return Ok(());
        };
        let header = format!(
            "[{}/{}] {} ({} mode)",
            session.position() + 1,
            session.len(),
            question.prompt,
            quiz.mode()
        );
        term.say(header)?;
        for (i, element) in ChartElement::SELECTABLE.iter().enumerate() {
            term.say(format!("  {}) {}", i + 1, quiz.mode().color_of(*element)))?;
        }

        let Some(line) = term.ask("option")? else {
            return Ok(());
        };
        match parse_step(&line) {
            Step::Quit => return Ok(()),
            Step::Back => {
                quiz.session_mut().retreat();
            }
            Step::Skip => {
                quiz.session_mut().skip();
            }
            Step::Mode(raw) => {
                if let Some(mode) = recover(term, raw.parse::<DisplayMode>())? {
                    quiz.set_mode(mode);
                }
            }
            Step::Answer(raw) => {
                if let Some(element) = recover(term, chart_option(&raw))? {
                    recover(term, quiz.submit(element))?;
                }
            }
        }
    }
}

fn chart_option(raw: &str) -> Result<ChartElement, QuizError> {
    match raw.trim().parse::<usize>() {
        Ok(n) => n
            .checked_sub(1)
            .and_then(|i| ChartElement::SELECTABLE.get(i))
            .copied()
            .ok_or_else(|| QuizError::InvalidInput {
                input: raw.to_string(),
                reason: format!("choose 1 to {}", ChartElement::SELECTABLE.len()),
            }),
        Err(_) => raw.parse(),
    }
}

fn probe_prompt(probe: &RadarProbe, rng: &mut StdRng) -> String {
    match &probe.stimulus {
        ProbeStimulus::SameDifferent { first, second } => {
            format!("{} {first} vs {second} [yes/no]", probe.prompt)
        }
        ProbeStimulus::Contrast {
            target, background, ..
        } => format!("{} {target} on {background} [yes/no]", probe.prompt),
        ProbeStimulus::CountEstimate { true_count } => {
            format!("{} {}", probe.prompt, sweep(*true_count, rng))
        }
    }
}

/// A one-line radar sweep with `targets` blips at random positions.
fn sweep(targets: u32, rng: &mut StdRng) -> String {
    const WIDTH: usize = 32;
    let mut cells = vec!['.'; WIDTH];
    let mut placed = 0;
    while placed < targets.min(WIDTH as u32) {
        let i = rng.random_range(0..WIDTH);
        if cells[i] == '.' {
            cells[i] = '*';
            placed += 1;
        }
    }
    format!("|{}|", cells.into_iter().collect::<String>())
}

// ---------------------------------------------------------------------------
// Arrangement tasks
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq)]
enum Edit {
    Move(ItemId, usize),
    Shuffle,
    Done,
    Quit,
}

fn parse_edit(line: &str) -> Result<Edit, QuizError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["move", id, slot] => {
            let slot: usize = slot
                .parse()
                .ok()
                .filter(|&s| s > 0)
                .ok_or_else(|| QuizError::InvalidInput {
                    input: slot.to_string(),
                    reason: "slots are numbered from 1".into(),
                })?;
            Ok(Edit::Move(ItemId::from(*id), slot - 1))
        }
        ["shuffle"] => Ok(Edit::Shuffle),
        ["done"] => Ok(Edit::Done),
        [":quit"] | [":q"] => Ok(Edit::Quit),
        _ => Err(QuizError::InvalidInput {
            input: line.to_string(),
            reason: "expected 'move <id> <slot>', 'shuffle' or 'done'".into(),
        }),
    }
}

fn run_arrangement<R: BufRead, W: Write>(
    session: &mut ArrangementSession,
    term: &mut Terminal<R, W>,
    rng: &mut StdRng,
) -> Result<()> {
    while !session.is_complete() {
        for (slot, swatch) in session.swatches().enumerate() {
            let label = swatch.label.as_deref().unwrap_or("");
            term.say(format!(
                "  {:>2}. {:<14} {} {label}",
                slot + 1,
                swatch.id.as_str(),
                swatch.hex
            ))?;
        }
        let Some(line) = term.ask("arrange")? else {
            return Ok(());
        };
        let Some(edit) = recover(term, parse_edit(&line))? else {
            continue;
        };
        match edit {
            Edit::Move(id, slot) => match session.move_item(&id, slot) {
                Err(e @ QuizError::InvalidArrangement(_)) => term.say(format!("  {e}"))?,
                other => other?,
            },
            Edit::Shuffle => session.reshuffle(rng)?,
            Edit::Done => session.complete(),
            Edit::Quit => return Ok(()),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn terminal(input: &str) -> Terminal<&[u8], Vec<u8>> {
        Terminal::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn navigation_commands() {
        assert_eq!(parse_step(":back"), Step::Back);
        assert_eq!(parse_step(" :skip "), Step::Skip);
        assert_eq!(parse_step(":q"), Step::Quit);
        assert_eq!(parse_step(":mode night"), Step::Mode("night".into()));
        assert_eq!(parse_step(""), Step::Answer(String::new()));
        assert_eq!(parse_step("red green"), Step::Answer("red green".into()));
    }

    #[test]
    fn edit_commands() {
        assert_eq!(
            parse_edit("move fm-03 1").unwrap(),
            Edit::Move(ItemId::from("fm-03"), 0)
        );
        assert_eq!(parse_edit("done").unwrap(), Edit::Done);
        assert!(parse_edit("move fm-03 0").is_err());
        assert!(parse_edit("sort").is_err());
    }

    #[test]
    fn chart_options_by_number_or_name() {
        assert_eq!(chart_option("1").unwrap(), ChartElement::SELECTABLE[0]);
        assert_eq!(chart_option("danger").unwrap(), ChartElement::Danger);
        assert!(chart_option("0").is_err());
        assert!(chart_option("99").is_err());
    }

    #[test]
    fn sweep_shows_every_target() {
        let mut rng = StdRng::seed_from_u64(5);
        let line = sweep(7, &mut rng);
        assert_eq!(line.matches('*').count(), 7);
    }

    #[test]
    fn lantern_run_reprompts_on_bad_input() {
        let config = SeavisionConfig {
            seed: Some(1),
            ..Default::default()
        };
        let mut input = String::from("red blue\n");
        for _ in 0..9 {
            input.push_str("red green\n");
        }
        let mut term = terminal(&input);
        let (_, result) = run_quiz(QuizKind::Lantern, &config, &mut term).unwrap().unwrap();
        assert_eq!(result.max, 9);
        assert_eq!(result.raw, 1);
        let shown = String::from_utf8(term.output).unwrap();
        assert!(shown.contains("invalid input 'blue'"));
    }

    #[test]
    fn hue_run_requires_done() {
        let config = SeavisionConfig::default();
        let mut term = terminal("shuffle\n");
        assert!(run_quiz(QuizKind::Hue, &config, &mut term).unwrap().is_none());

        let mut term = terminal("done\n");
        let (_, result) = run_quiz(QuizKind::Hue, &config, &mut term).unwrap().unwrap();
        assert_eq!(result.quiz, QuizKind::Hue);
    }

    #[test]
    fn early_quit_scores_what_was_answered() {
        let config = SeavisionConfig::default();
        let mut term = terminal("12\n:quit\n");
        let (_, result) = run_quiz(QuizKind::Ishihara, &config, &mut term).unwrap().unwrap();
        assert_eq!(result.max, 24);
        assert!(result.has_data());
    }
}
