//! Terminal questionnaire.
//!
//! Drives [`Wizard`] one step at a time over any `BufRead`/`Write` pair, so the same code runs
//! against a TTY and against in-memory buffers in tests. Typing `restart` at any prompt discards
//! the current case and starts again at tooth selection; end of input ends the session.

use std::collections::BTreeSet;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

use endo_core::{
    parse_periapical_symptoms, parse_pulpal_symptoms, AdditionalFindings, CaseOverview,
    DiagnosisResult, Finding, PeriapicalSymptom, PulpalSymptom, ToothKind, ToothReference, Wizard,
    WizardStep,
};

const RESTART_COMMAND: &str = "restart";

/// Why a case stopped before reaching the summary.
enum Interrupt {
    Restart,
    End,
    Io(io::Error),
}

impl From<io::Error> for Interrupt {
    fn from(err: io::Error) -> Self {
        Interrupt::Io(err)
    }
}

type Answer<T> = Result<T, Interrupt>;

pub struct Session<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run cases until the clinician declines another one or input ends.
    ///
    /// Returns the overview of every completed case, in order.
    pub fn run(&mut self) -> io::Result<Vec<CaseOverview>> {
        let mut completed = Vec::new();

        loop {
            match self.run_case() {
                Ok(overview) => {
                    completed.push(overview);
                    match self.ask_yes_no("Evaluate another tooth? [y/N] ") {
                        Ok(true) | Err(Interrupt::Restart) => continue,
                        Ok(false) | Err(Interrupt::End) => break,
                        Err(Interrupt::Io(e)) => return Err(e),
                    }
                }
                Err(Interrupt::Restart) => {
                    writeln!(self.output, "Starting over.")?;
                }
                Err(Interrupt::End) => break,
                Err(Interrupt::Io(e)) => return Err(e),
            }
        }

        tracing::debug!(cases = completed.len(), "wizard session finished");
        Ok(completed)
    }

    fn run_case(&mut self) -> Answer<CaseOverview> {
        let wizard = Wizard::new();
        self.heading(wizard.step())?;
        let tooth = self.ask_tooth()?;

        let wizard = wizard.select_tooth(tooth);
        self.heading(wizard.step())?;
        let complaint = self.ask("Describe the chief complaint (blank if none): ")?;

        let wizard = wizard.submit_chief_complaint(Some(complaint));
        self.heading(wizard.step())?;
        let pulpal = self.ask_symptoms(&PulpalSymptom::ALL, PulpalSymptom::label, |values| {
            parse_pulpal_symptoms(values)
        })?;

        let wizard = wizard.submit_pulpal(pulpal);
        self.heading(wizard.step())?;
        let periapical =
            self.ask_symptoms(&PeriapicalSymptom::ALL, PeriapicalSymptom::label, |values| {
                parse_periapical_symptoms(values)
            })?;

        let wizard = wizard.submit_periapical(periapical);
        if let Some(message) = &wizard.periapical_red_flag().message {
            writeln!(self.output, "\n{message}")?;
        }
        self.heading(wizard.step())?;
        let additional = self.ask_additional()?;

        let wizard = wizard.submit_additional(additional);
        let report = wizard.report();
        tracing::debug!(
            ambiguous = report.is_ambiguous(),
            actionable = report.treatment.is_actionable(),
            "case evaluated"
        );
        let overview = wizard.overview();
        writeln!(self.output, "\n{overview}")?;
        Ok(overview)
    }

    fn heading(&mut self, step: WizardStep) -> io::Result<()> {
        writeln!(self.output, "\n## {step}")
    }

    /// Prompt and read one trimmed line.
    fn ask(&mut self, prompt: &str) -> Answer<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Interrupt::End);
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case(RESTART_COMMAND) {
            return Err(Interrupt::Restart);
        }
        Ok(line.to_string())
    }

    fn ask_yes_no(&mut self, prompt: &str) -> Answer<bool> {
        loop {
            match self.ask(prompt)?.to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "" | "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "Please answer y or n.")?,
            }
        }
    }

    fn ask_tooth(&mut self) -> Answer<ToothReference> {
        let kinds = ToothKind::ALL
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        let kind = loop {
            match ToothKind::from_str(&self.ask(&format!("Tooth type ({kinds}): "))?) {
                Ok(kind) => break kind,
                Err(e) => writeln!(self.output, "{e}")?,
            }
        };

        let catalogue = kind.catalogue();
        if !catalogue.is_empty() {
            writeln!(self.output, "Options: {}", catalogue.join(", "))?;
        }

        loop {
            match ToothReference::new(self.ask("Tooth: ")?, kind) {
                Ok(tooth) => return Ok(tooth),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    /// List the vocabulary and read a comma-separated selection of numbers, keys or labels.
    fn ask_symptoms<T, F>(
        &mut self,
        all: &[T],
        label: fn(T) -> &'static str,
        parse: F,
    ) -> Answer<BTreeSet<T>>
    where
        T: Copy + Ord,
        F: Fn(Vec<String>) -> DiagnosisResult<BTreeSet<T>>,
    {
        for (i, symptom) in all.iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, label(*symptom))?;
        }

        loop {
            let answer = self.ask("Select all that apply (e.g. 1,3; blank for none): ")?;
            match parse(expand_selection(&answer, all, label)) {
                Ok(selected) => return Ok(selected),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }

    fn ask_finding(&mut self, question: &str, detail_prompt: &str) -> Answer<Finding> {
        if !self.ask_yes_no(&format!("{question} [y/N] "))? {
            return Ok(Finding::default());
        }
        let detail = self.ask(&format!("{detail_prompt}: "))?;
        Ok(Finding::positive(detail))
    }

    fn ask_additional(&mut self) -> Answer<AdditionalFindings> {
        Ok(AdditionalFindings {
            probing: self.ask_finding("Deep/narrow probings?", "Probing depth and location")?,
            bite_stick: self.ask_finding("Bite stick positive?", "Which cusp(s)")?,
            caries: self.ask_finding("Caries present?", "Location of caries")?,
            recent_work: self.ask_finding("Recent dental work?", "When")?,
            mastication: self.ask_finding(
                "Discomfort with muscles of mastication?",
                "Which muscles or side",
            )?,
            occlusion: self.ask("Describe the occlusion (blank if none): ")?,
        })
    }
}

/// Turn a typed selection into vocabulary strings, mapping list numbers to labels.
///
/// Anything that is not a list number is passed through for the vocabulary to accept or reject.
fn expand_selection<T: Copy>(answer: &str, all: &[T], label: fn(T) -> &'static str) -> Vec<String> {
    answer
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| match token.parse::<usize>() {
            Ok(n) if (1..=all.len()).contains(&n) => label(all[n - 1]).to_string(),
            _ => token.to_string(),
        })
        .collect()
}
