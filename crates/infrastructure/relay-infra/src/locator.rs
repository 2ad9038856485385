use camino::{Utf8Path, Utf8PathBuf};
use directories::BaseDirs;
use relay_core::{RelayError, ToolLocation};
use std::fs;
use std::io::{self, BufRead, Write};
use tracing::{error, warn};

/// Where to look for the rclone binary and where to remember it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorConfig {
    pub program: String,
    pub location_file: Utf8PathBuf,
}

impl LocatorConfig {
    /// `rclone` on the search path, remembered in `~/.relayrc`.
    pub fn from_home() -> Result<Self, RelayError> {
        let dirs = BaseDirs::new().ok_or_else(|| {
            RelayError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                "could not determine home directory",
            ))
        })?;
        let home = Utf8Path::from_path(dirs.home_dir()).ok_or_else(|| {
            RelayError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                "home directory is not valid UTF-8",
            ))
        })?;
        Ok(Self {
            program: relay_config::PROGRAM_NAME.to_string(),
            location_file: home.join(relay_config::LOCATION_FILE_NAME),
        })
    }
}

/// Source of a path typed in by the operator.
pub trait PathPrompt {
    fn ask(&mut self, question: &str) -> io::Result<String>;
}

/// Reads the answer from standard input.
pub struct StdinPrompt;

impl PathPrompt for StdinPrompt {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        let mut stdout = io::stdout();
        stdout.write_all(question.as_bytes())?;
        stdout.flush()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Explicit(ToolLocation),
    SearchPath(ToolLocation),
    Persisted(ToolLocation),
    /// Entered by the operator; must be written to the location file.
    Prompted(ToolLocation),
}

impl Resolution {
    pub fn into_location(self) -> ToolLocation {
        match self {
            Resolution::Explicit(p)
            | Resolution::SearchPath(p)
            | Resolution::Persisted(p)
            | Resolution::Prompted(p) => p,
        }
    }
}

/// Decides the binary location from what is already known. The prompt is only
/// consulted when every other source is empty.
pub fn resolve_location<P, E>(
    explicit: Option<&str>,
    search_hit: Option<ToolLocation>,
    persisted: Option<String>,
    prompt: P,
    exists: E,
) -> Result<Resolution, RelayError>
where
    P: FnOnce() -> io::Result<String>,
    E: Fn(&Utf8Path) -> bool,
{
    if let Some(path) = explicit.filter(|p| !p.is_empty()) {
        return Ok(Resolution::Explicit(ToolLocation::from(path)));
    }
    if let Some(path) = search_hit {
        return Ok(Resolution::SearchPath(path));
    }
    if let Some(contents) = persisted {
        return Ok(Resolution::Persisted(ToolLocation::from(contents.trim_end())));
    }

    warn!(
        "Could not find rclone in your PATH. Enter it manually and the program will remember it."
    );
    let entered = ToolLocation::from(prompt()?.trim());
    if !exists(&entered) {
        error!("The rclone path you entered does not exist: {}", entered);
        return Err(RelayError::BinaryNotFound(entered));
    }
    Ok(Resolution::Prompted(entered))
}

pub struct BinaryLocator<P: PathPrompt> {
    config: LocatorConfig,
    prompt: P,
}

impl<P: PathPrompt> BinaryLocator<P> {
    pub fn with_prompt(config: LocatorConfig, prompt: P) -> Self {
        Self { config, prompt }
    }

    /// Runs the lookup chain and persists a prompted answer.
    pub fn locate(&mut self, explicit: Option<&str>) -> Result<ToolLocation, RelayError> {
        let has_explicit = explicit.is_some_and(|p| !p.is_empty());
        let search_hit = if has_explicit {
            None
        } else {
            which::which(&self.config.program)
                .ok()
                .and_then(|p| Utf8PathBuf::from_path_buf(p).ok())
        };

        let persisted = if has_explicit || search_hit.is_some() {
            None
        } else {
            match fs::read_to_string(&self.config.location_file) {
                Ok(contents) => Some(contents),
                Err(e) if e.kind() == io::ErrorKind::NotFound => None,
                Err(e) => return Err(e.into()),
            }
        };

        let prompt = &mut self.prompt;
        let resolution = resolve_location(
            explicit,
            search_hit,
            persisted,
            || prompt.ask(relay_config::LOCATION_PROMPT),
            |p| p.exists(),
        )?;

        if let Resolution::Prompted(path) = &resolution {
            fs::write(&self.config.location_file, path.as_str())?;
        }
        Ok(resolution.into_location())
    }
}
