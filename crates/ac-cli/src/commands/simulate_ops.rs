use std::path::Path;
use std::process;

use serde::Serialize;

use autocomplete_engine::{
    word_list_load, AutoCompletion, CompletionEvent, EventLog, MemoryInput, TextInput, TextRange,
};

use crate::script::{parse_script, Step};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub struct SimulateOptions<'a> {
    pub words_file: &'a str,
    pub language: &'a str,
    pub dictation: bool,
    pub json: bool,
}

/// State of the input after one script step has settled.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Frame {
    pub step: String,
    /// Input text, marked region in brackets.
    pub display: String,
    pub baseline: Option<String>,
    pub events: Vec<String>,
}

pub fn simulate_cmd(script: &str, opts: &SimulateOptions) {
    let steps = die!(parse_script(script), "Error parsing script: {}");
    tracing::debug!(steps = steps.len(), "parsed script");
    let words = die!(
        word_list_load(Path::new(opts.words_file)),
        "Error loading word list: {}"
    );

    let mut input = MemoryInput::new();
    input.set_language(if opts.dictation {
        "dictation"
    } else {
        opts.language
    });
    let mut ac = die!(AutoCompletion::attach(input), "Error attaching: {}");
    let log = EventLog::new();
    ac.set_source(words);
    ac.set_listener(log.clone());

    let frames = run_steps(&mut ac, &log, &steps);

    if opts.json {
        for frame in &frames {
            let line = die!(serde_json::to_string(frame), "Error encoding frame: {}");
            println!("{line}");
        }
        return;
    }
    for frame in &frames {
        println!("{:<10} {}", frame.step, frame.display);
        for event in &frame.events {
            println!("{:<10}   {event}", "");
        }
    }
}

/// Apply each step, let the controller settle, and record a frame.
pub fn run_steps(
    ac: &mut AutoCompletion<MemoryInput>,
    log: &EventLog,
    steps: &[Step],
) -> Vec<Frame> {
    let mut frames = Vec::with_capacity(steps.len());
    for step in steps {
        apply_step(ac, step);
        ac.flush();
        frames.push(Frame {
            step: step.to_string(),
            display: render(ac.input()),
            baseline: ac.baseline().map(str::to_string),
            events: log.take().iter().map(describe_event).collect(),
        });
    }
    frames
}

fn apply_step(ac: &mut AutoCompletion<MemoryInput>, step: &Step) {
    match step {
        Step::Key(c) => ac.input_mut().type_text(&c.to_string()),
        Step::Backspace => {
            ac.input_mut().backspace();
        }
        Step::Tap => ac.pointer_down(),
        Step::Left => {
            let caret = ac.input().selection().start;
            ac.input_mut().move_caret(caret.saturating_sub(1));
        }
        Step::Right => {
            let caret = ac.input().selection().end;
            ac.input_mut().move_caret(caret + 1);
        }
        Step::End => ac.input_mut().move_to_end(),
        Step::Set(text) => ac.input_mut().replace_text(text),
    }
}

pub fn render(input: &MemoryInput) -> String {
    let Some(marked) = input.marked_text_range() else {
        return input.text();
    };
    let slice = |start, end| input.text_in_range(TextRange::new(start, end)).unwrap_or_default();
    format!(
        "{}[{}]{}",
        slice(0, marked.start),
        slice(marked.start, marked.end),
        slice(marked.end, input.end_of_document())
    )
}

fn describe_event(event: &CompletionEvent) -> String {
    match event {
        CompletionEvent::TextChanged(Some(text)) => format!("changed {text:?}"),
        CompletionEvent::TextChanged(None) => "changed (none)".to_string(),
        CompletionEvent::WillComplete { typed, suffix } => format!("will {typed:?} + {suffix:?}"),
        CompletionEvent::DidComplete { typed, suffix } => format!("did {typed:?} + {suffix:?}"),
    }
}
