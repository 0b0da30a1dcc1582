use crate::config::{Config, LOG_FILE_NAME};
use crate::core::audit::AuditLog;
use crate::core::renamer::{NameRepairer, RenameReport};
use crate::core::text_converter::{ConversionReport, TextConverter};
use crate::error::{FixError, Result};
use crate::utils::prompt::Prompter;
use tracing::info;

/// Asked once before anything on disk is touched.
pub const SAFETY_QUESTION: &str = "This tool only applies to files garbled on a Simplified Chinese system.\n\
     Please confirm the current working directory is the folder to convert.\n\
     Back up your original files before running this tool!\n\
     Continue?";

/// What a completed run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub names: RenameReport,
    pub text_files_found: usize,
    /// `None` when no text file was found or the operator declined conversion.
    pub text: Option<ConversionReport>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The operator declined the safety question; nothing was changed.
    Declined,
    Completed(RunSummary),
}

/// One interactive repair session over a working directory.
pub struct App<P> {
    config: Config,
    prompter: P,
}

impl<P: Prompter> App<P> {
    pub fn new(config: Config, prompter: P) -> Self {
        Self { config, prompter }
    }

    pub fn run(&mut self) -> Result<RunOutcome> {
        println!("Current working directory: {}", self.config.work_dir.display());

        if !confirm(&mut self.prompter, SAFETY_QUESTION)? {
            info!("run declined by operator");
            return Ok(RunOutcome::Declined);
        }

        let audit = AuditLog::reset(&self.config.log_file)?;
        let mut summary = RunSummary {
            names: NameRepairer::new(&self.config, &audit).run()?,
            ..Default::default()
        };
        println!(
            "File/directory names converted ({} renamed).",
            summary.names.total_renamed()
        );

        let converter = TextConverter::new(&self.config, &audit);
        let text_files = converter.find_text_files()?;
        summary.text_files_found = text_files.len();

        if !text_files.is_empty() {
            let question = format!(
                "Found {} txt files, convert their contents?",
                text_files.len()
            );
            if confirm(&mut self.prompter, &question)? {
                let report = converter.convert_all(&text_files)?;
                println!("txt files converted ({} rewritten).", report.converted);
                summary.text = Some(report);
            }
        }

        println!(
            "Conversion finished, thank you. The log was saved as {}",
            LOG_FILE_NAME
        );
        Ok(RunOutcome::Completed(summary))
    }
}

fn confirm<P: Prompter>(prompter: &mut P, question: &str) -> Result<bool> {
    prompter.confirm(question).map_err(FixError::Prompt)
}
