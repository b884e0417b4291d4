//! Command-line interface for the uml utility
//!
//! Each invocation loads a JSON diagram document, applies one model
//! operation, and writes the document back if the operation changed it.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::text_view::TextClassView;
use umlmodel::core::logging::init_logging;
use umlmodel::model::ClassManager;
use umlmodel::{ModelError, ModelResult};

/// uml - Edit UML class-diagram documents
#[derive(Parser)]
#[command(name = "uml")]
#[command(about = "Edit the classes, members and relationships of a UML class diagram")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Diagram document to edit
    #[arg(short, long, env = "UMLMODEL_FILE", default_value = "diagram.json")]
    pub file: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
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
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
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

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Add a class
    AddClass { name: String },

    /// Remove a class and all of its relationships
    RemoveClass { name: String },

    /// Rename a class
    RenameClass { old: String, new: String },

    /// Move a class on the diagram
    MoveClass {
        name: String,
        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
    },

    /// Add a field to a class
    AddField {
        class: String,
        name: String,
        /// Type descriptor shown before the field name
        #[arg(long = "type")]
        type_descriptor: Option<String>,
    },

    /// Remove a field from a class
    RemoveField { class: String, name: String },

    /// Rename a field
    RenameField {
        class: String,
        old: String,
        new: String,
    },

    /// Add a method to a class
    AddMethod {
        class: String,
        name: String,
        /// Signature descriptor shown before the method name
        #[arg(long)]
        signature: Option<String>,
    },

    /// Remove a method from a class
    RemoveMethod { class: String, name: String },

    /// Rename a method
    RenameMethod {
        class: String,
        old: String,
        new: String,
    },

    /// Relate two classes
    AddRelationship { source: String, destination: String },

    /// Remove the relationship between two classes
    RemoveRelationship { source: String, destination: String },

    /// List all classes
    ListClasses,

    /// List the fields of a class
    ListFields { class: String },

    /// List the methods of a class
    ListMethods { class: String },

    /// List the relationships of a class
    ListRelationships { class: String },

    /// Draw a class as a text card
    Show {
        class: String,
        /// Use pure ASCII box characters
        #[arg(long)]
        ascii: bool,
    },

    /// Print the document as JSON
    Export,
}

impl Commands {
    /// True if the command can change the document
    pub fn mutates(&self) -> bool {
        !matches!(
            self,
            Commands::ListClasses
                | Commands::ListFields { .. }
                | Commands::ListMethods { .. }
                | Commands::ListRelationships { .. }
                | Commands::Show { .. }
                | Commands::Export
        )
    }
}

/// Main CLI application
#[derive(Default)]
pub struct UmlApp {
    manager: ClassManager,
}

impl UmlApp {
    /// Create an application with an empty diagram
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a reference to the diagram (for testing)
    #[cfg(test)]
    pub fn manager(&self) -> &ClassManager {
        &self.manager
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var("UMLMODEL_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("UMLMODEL_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("uml v{}", env!("CARGO_PKG_VERSION"));
        }

        self.manager = load_document(&cli.file)?;

        let mutates = cli.command.mutates();
        let output = self
            .execute(cli.command)
            .map_err(|e| anyhow!("{} (code {})", e, e.code()))?;

        if mutates {
            save_document(&cli.file, &self.manager)?;
            if cli.verbose {
                eprintln!("Saved {}", cli.file.display());
            }
        }

        if let Some(text) = output {
            let mut stdout = io::stdout();
            writeln!(stdout, "{}", text)?;
            stdout.flush()?;
        }
        Ok(())
    }

    /// Apply one command to the diagram
    ///
    /// Returns the text to print, if the command produces any.
    pub fn execute(&mut self, command: Commands) -> ModelResult<Option<String>> {
        let manager = &mut self.manager;
        match command {
            Commands::AddClass { name } => manager.add_class(&name).map(|_| None),
            Commands::RemoveClass { name } => manager.remove_class(&name).map(|_| None),
            Commands::RenameClass { old, new } => manager.edit_class(&old, &new).map(|_| None),
            Commands::MoveClass { name, x, y } => {
                manager.set_class_location(&name, x, y).map(|_| None)
            }
            Commands::AddField {
                class,
                name,
                type_descriptor,
            } => match type_descriptor {
                Some(t) => manager.add_field_with_type(&class, &name, &t),
                None => manager.add_field(&class, &name),
            }
            .map(|_| None),
            Commands::RemoveField { class, name } => {
                manager.remove_field(&class, &name).map(|_| None)
            }
            Commands::RenameField { class, old, new } => {
                manager.edit_field(&class, &old, &new).map(|_| None)
            }
            Commands::AddMethod {
                class,
                name,
                signature,
            } => match signature {
                Some(s) => manager.add_method_with_signature(&class, &name, &s),
                None => manager.add_method(&class, &name),
            }
            .map(|_| None),
            Commands::RemoveMethod { class, name } => {
                manager.remove_method(&class, &name).map(|_| None)
            }
            Commands::RenameMethod { class, old, new } => {
                manager.edit_method(&class, &old, &new).map(|_| None)
            }
            Commands::AddRelationship {
                source,
                destination,
            } => manager.add_relationship(&source, &destination).map(|_| None),
            Commands::RemoveRelationship {
                source,
                destination,
            } => manager
                .remove_relationship(&source, &destination)
                .map(|_| None),
            Commands::ListClasses => Ok(Some(manager.list_classes())),
            Commands::ListFields { class } => manager.list_fields(&class).map(|fields| {
                let labels: Vec<String> = fields.values().map(ToString::to_string).collect();
                Some(format!("[{}]", labels.join(", ")))
            }),
            Commands::ListMethods { class } => manager.list_methods(&class).map(|methods| {
                let labels: Vec<String> = methods.values().map(ToString::to_string).collect();
                Some(format!("[{}]", labels.join(", ")))
            }),
            Commands::ListRelationships { class } => manager.list_relationships(&class).map(Some),
            Commands::Show { class, ascii } => match manager.get_class(&class) {
                Some(found) => {
                    let view = TextClassView::new(found);
                    let (x, y) = view.location();
                    Ok(Some(format!("{}\nat ({}, {})", view.render(ascii), x, y)))
                }
                None => Err(ModelError::ClassNotFound { name: class }),
            },
            Commands::Export => manager.to_json().map(Some),
        }
    }
}

/// Read a document, or start an empty diagram if the file does not exist
pub fn load_document(path: &Path) -> Result<ClassManager> {
    if !path.exists() {
        info!(path = %path.display(), "Starting new document");
        return Ok(ClassManager::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read document '{}'", path.display()))?;
    ClassManager::load(&content).map_err(|e| {
        anyhow!(
            "Failed to load document '{}': {} (code {})",
            path.display(),
            e,
            e.code()
        )
    })
}

/// Write a document to disk
pub fn save_document(path: &Path, manager: &ClassManager) -> Result<()> {
    let json = manager
        .to_json()
        .map_err(|e| anyhow!("Failed to serialize document: {}", e))?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write document '{}'", path.display()))?;
    info!(path = %path.display(), "Saved document");
    Ok(())
}
