//! Line-oriented driver used when `FIT_INTAKE_CLI_SCRIPT` is set.
//!
//! Each stdin line is split with shell quoting rules and mapped onto a
//! [`FlowCommand`] for the screen currently displayed. Options and questions
//! can be named by label (case-insensitive) or by their 1-based position.

use std::io::BufRead;

use intake_core::{BlockReason, CoreError, FlowView, InputEvent};
use intake_domain::ScreenKind;
use shell_words::split;
use strsim::levenshtein;

use super::interaction::{FlowCommand, FlowInteraction};
use super::{output, render};

const COMMANDS: &[&str] = &[
    "set", "select", "toggle", "frequency", "next", "back", "show", "quit",
];
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// A parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptLine {
    Command(FlowCommand),
    Show,
    Skip,
}

pub fn parse_line(line: &str, view: &FlowView<'_>) -> Result<ScriptLine, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(ScriptLine::Skip);
    }
    let tokens = split(trimmed).map_err(|err| format!("Could not parse line: {err}"))?;
    let Some((raw, args)) = tokens.split_first() else {
        return Ok(ScriptLine::Skip);
    };

    let command = match raw.to_lowercase().as_str() {
        "next" | "continue" => FlowCommand::Continue,
        "back" => FlowCommand::Back,
        "quit" | "exit" => FlowCommand::Quit,
        "show" => return Ok(ScriptLine::Show),
        "set" => parse_set(args, view)?,
        "select" => parse_select(args, view)?,
        "toggle" => parse_toggle(args, view)?,
        "frequency" => parse_frequency(args, view)?,
        other => {
            let mut message = format!("Unknown command `{}`.", raw);
            if let Some(best) = suggest(COMMANDS.iter().copied(), other) {
                message.push_str(&format!(" Suggestion: `{}`?", best));
            }
            return Err(message);
        }
    };
    Ok(ScriptLine::Command(command))
}

fn parse_set(args: &[String], view: &FlowView<'_>) -> Result<FlowCommand, String> {
    let ScreenKind::Form { fields, .. } = &view.screen.kind else {
        return Err(wrong_screen("set", view));
    };
    let (field, value) = args
        .split_first()
        .ok_or_else(|| "Usage: set <field> <value>".to_string())?;
    let descriptor = fields
        .iter()
        .find(|candidate| {
            candidate.name.eq_ignore_ascii_case(field) || candidate.label.eq_ignore_ascii_case(field)
        })
        .ok_or_else(|| {
            not_found("field", field, fields.iter().map(|field| field.name.as_str()))
        })?;
    Ok(FlowCommand::Input(InputEvent::FieldEdit {
        name: descriptor.name.clone(),
        value: value.join(" "),
    }))
}

fn parse_select(args: &[String], view: &FlowView<'_>) -> Result<FlowCommand, String> {
    let ScreenKind::SingleChoice { questions } = &view.screen.kind else {
        return Err(wrong_screen("select", view));
    };
    let [question, option] = args else {
        return Err("Usage: select <question> <option>".to_string());
    };
    let labels: Vec<&str> = questions.iter().map(|q| q.question.as_str()).collect();
    let position = resolve(&labels, question)
        .ok_or_else(|| not_found("question", question, labels.iter().copied()))?;
    let chosen = &questions[position];
    let options: Vec<&str> = chosen.options.iter().map(String::as_str).collect();
    let picked = resolve(&options, option)
        .ok_or_else(|| not_found("option", option, options.iter().copied()))?;
    Ok(FlowCommand::Input(InputEvent::OptionSelect {
        question: chosen.question.clone(),
        option: chosen.options[picked].clone(),
    }))
}

fn parse_toggle(args: &[String], view: &FlowView<'_>) -> Result<FlowCommand, String> {
    let ScreenKind::MultiSelect {
        collection,
        options,
        ..
    } = &view.screen.kind
    else {
        return Err(wrong_screen("toggle", view));
    };
    if args.is_empty() {
        return Err("Usage: toggle <option>".to_string());
    }
    let wanted = args.join(" ");
    let labels: Vec<&str> = options.iter().map(String::as_str).collect();
    let position = resolve(&labels, &wanted)
        .ok_or_else(|| not_found("option", &wanted, labels.iter().copied()))?;
    Ok(FlowCommand::Input(InputEvent::OptionToggle {
        collection: collection.clone(),
        option: options[position].clone(),
    }))
}

fn parse_frequency(args: &[String], view: &FlowView<'_>) -> Result<FlowCommand, String> {
    let ScreenKind::Frequency { options, .. } = &view.screen.kind else {
        return Err(wrong_screen("frequency", view));
    };
    let [raw] = args else {
        return Err("Usage: frequency <times per week>".to_string());
    };
    let value: u8 = raw
        .trim_end_matches('x')
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    if !options.contains(&value) {
        let allowed = options
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(format!("Frequency must be one of: {allowed}"));
    }
    Ok(FlowCommand::Input(InputEvent::FrequencySelect(value)))
}

/// Finds a candidate by 1-based position or case-insensitive label.
fn resolve(candidates: &[&str], raw: &str) -> Option<usize> {
    if let Ok(number) = raw.parse::<usize>() {
        return (1..=candidates.len()).contains(&number).then(|| number - 1);
    }
    candidates
        .iter()
        .position(|candidate| candidate.eq_ignore_ascii_case(raw))
}

fn suggest<'a>(candidates: impl Iterator<Item = &'a str>, input: &str) -> Option<&'a str> {
    let input = input.to_lowercase();
    candidates
        .map(|candidate| (levenshtein(&candidate.to_lowercase(), &input), candidate))
        .min_by_key(|(distance, _)| *distance)
        .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
        .map(|(_, candidate)| candidate)
}

fn not_found<'a>(what: &str, input: &str, candidates: impl Iterator<Item = &'a str>) -> String {
    let mut message = format!("Unknown {what} `{input}`.");
    if let Some(best) = suggest(candidates, input) {
        message.push_str(&format!(" Suggestion: `{}`?", best));
    }
    message
}

fn wrong_screen(command: &str, view: &FlowView<'_>) -> String {
    let kind = if view.is_preview() {
        "preview"
    } else {
        view.screen.kind.label()
    };
    format!("`{command}` is not available on the {kind} screen")
}

/// Reads commands from a buffered reader. End of input quits the flow.
pub struct ScriptInteraction<R: BufRead> {
    reader: R,
    last_rendered: Option<(usize, bool)>,
}

impl<R: BufRead> ScriptInteraction<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            last_rendered: None,
        }
    }

    fn show(&mut self, view: &FlowView<'_>) {
        output::lines(&render::render_view(view));
        self.last_rendered = Some((view.index, view.is_preview()));
    }
}

impl<R: BufRead> FlowInteraction for ScriptInteraction<R> {
    fn next_command(&mut self, view: &FlowView<'_>) -> FlowCommand {
        if self.last_rendered != Some((view.index, view.is_preview())) {
            println!();
            self.show(view);
        }
        loop {
            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => return FlowCommand::Quit,
                Ok(_) => {}
                Err(err) => {
                    output::error(format!("Failed to read input: {err}"));
                    return FlowCommand::Quit;
                }
            }
            match parse_line(&line, view) {
                Ok(ScriptLine::Command(command)) => return command,
                Ok(ScriptLine::Show) => self.show(view),
                Ok(ScriptLine::Skip) => {}
                Err(message) => output::warning(message),
            }
        }
    }

    fn blocked(&mut self, reason: &BlockReason) {
        output::warning(reason);
    }

    fn persistence_failed(&mut self, error: &CoreError) -> bool {
        output::error(error);
        false
    }
}
