use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Error as IOError;
use std::num::{ParseFloatError, ParseIntError};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use logger::{Level, Logger};

/// How many levels a node may reach, as a function of the number of elements
/// already in the list.
#[derive(Clone)]
pub enum MaxLevel {
    /// A constant ceiling. Must be at least 1.
    Fixed(usize),
    /// `floor(log2(count))` once the list holds two or more elements, 1 before that.
    Logarithmic,
    /// Any other policy. It must never return 0.
    Custom(Arc<dyn Fn(usize) -> usize + Send + Sync>),
}

impl MaxLevel {
    /// Level ceiling for a list currently holding `count` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use config::MaxLevel;
    ///
    /// assert_eq!(MaxLevel::Logarithmic.ceiling(0).unwrap(), 1);
    /// assert_eq!(MaxLevel::Logarithmic.ceiling(7).unwrap(), 2);
    /// assert_eq!(MaxLevel::Logarithmic.ceiling(8).unwrap(), 3);
    /// assert!(MaxLevel::Fixed(0).ceiling(10).is_err());
    /// ```
    pub fn ceiling(&self, count: usize) -> Result<usize, ConfigError> {
        let ceiling = match *self {
            MaxLevel::Fixed(n) => n,
            MaxLevel::Logarithmic => {
                if count >= 2 {
                    (usize::BITS - 1 - count.leading_zeros()) as usize
                } else {
                    1
                }
            }
            MaxLevel::Custom(ref f) => f(count),
        };
        if ceiling == 0 {
            return Err(ConfigError::InvalidParameter(format!(
                "level ceiling for {} elements is 0",
                count
            )));
        }
        Ok(ceiling)
    }
}

impl Default for MaxLevel {
    fn default() -> MaxLevel {
        MaxLevel::Logarithmic
    }
}

impl fmt::Debug for MaxLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MaxLevel::Fixed(n) => write!(f, "Fixed({})", n),
            MaxLevel::Logarithmic => f.write_str("Logarithmic"),
            MaxLevel::Custom(_) => f.write_str("Custom"),
        }
    }
}

impl FromStr for MaxLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<MaxLevel, ConfigError> {
        if s == "log2" {
            return Ok(MaxLevel::Logarithmic);
        }
        match s.parse::<usize>()? {
            0 => Err(ConfigError::InvalidParameter("max-level must be positive".to_owned())),
            n => Ok(MaxLevel::Fixed(n)),
        }
    }
}

pub struct Config {
    pub max_level: MaxLevel,
    /// Chance that a node reaching level `n` also reaches level `n + 1`.
    pub probability: f64,
    /// Seed for the level generator; `None` draws one from the OS.
    pub seed: Option<u64>,
    pub loglevel: Level,
    /// Log destination; standard error when `None`.
    pub logfile: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidFormat,
    InvalidParameter(String),
    IOError(IOError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConfigError::InvalidFormat => f.write_str("invalid configuration format"),
            ConfigError::InvalidParameter(ref reason) => write!(f, "invalid parameter: {}", reason),
            ConfigError::IOError(ref e) => write!(f, "cannot read configuration: {}", e),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            ConfigError::IOError(ref e) => Some(e),
            _ => None,
        }
    }
}

/// Splits a configuration line in words. Double quotes group words together.
fn splitargs(line: &str) -> Result<Vec<String>, ConfigError> {
    let mut args = Vec::new();
    let mut chars = line.chars().peekable();
    loop {
        while chars.peek().map_or(false, |c| c.is_whitespace()) {
            chars.next();
        }
        let mut arg = String::new();
        match chars.peek() {
            None => return Ok(args),
            Some(&'"') => {
                chars.next();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some(c) => arg.push(c),
                        None => return Err(ConfigError::InvalidFormat),
                    }
                }
                // closing quote must end the word
                if chars.peek().map_or(false, |c| !c.is_whitespace()) {
                    return Err(ConfigError::InvalidFormat);
                }
            }
            Some(_) => {
                while let Some(&c) = chars.peek() {
                    if c.is_whitespace() {
                        break;
                    }
                    arg.push(c);
                    chars.next();
                }
            }
        }
        args.push(arg);
    }
}

fn read_string(args: &[String]) -> Result<String, ConfigError> {
    if args.len() != 2 {
        Err(ConfigError::InvalidFormat)
    } else {
        Ok(args[1].clone())
    }
}

fn read_parse<T>(args: &[String]) -> Result<T, ConfigError>
where
    T: FromStr,
{
    let s = read_string(args)?;
    match s.parse() {
        Ok(f) => Ok(f),
        Err(_) => Err(ConfigError::InvalidParameter(format!("{} {}", args[0], s))),
    }
}

impl Config {
    /// Settings used by deterministic tests: logarithmic ceiling, `p = 1/2`
    /// and a fixed seed.
    pub fn mock(seed: u64) -> Config {
        Config {
            seed: Some(seed),
            ..Config::new()
        }
    }

    pub fn new() -> Config {
        Config {
            max_level: MaxLevel::Logarithmic,
            probability: 0.5,
            seed: None,
            loglevel: Level::Warning,
            logfile: None,
        }
    }

    /// Reads `key value` lines from `fname` on top of the current settings.
    ///
    /// Recognised keys are `max-level`, `probability`, `seed`, `loglevel`,
    /// `logfile` and `include`. Lines starting with `#` are ignored.
    pub fn parsefile(&mut self, fname: &str) -> Result<(), ConfigError> {
        let path = Path::new(fname);
        let file = BufReader::new(File::open(path)?);
        for line_iter in file.lines() {
            let lline = line_iter?;
            let line = lline.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let args = splitargs(line)?;
            match &*args[0] {
                "max-level" => self.max_level = read_string(&args)?.parse::<MaxLevel>()?,
                "probability" => self.probability = read_string(&args)?.parse::<f64>()?,
                "seed" => self.seed = Some(read_parse(&args)?),
                "loglevel" => {
                    self.loglevel = read_string(&args)?
                        .parse::<Level>()
                        .map_err(ConfigError::InvalidParameter)?
                }
                "logfile" => {
                    let logfile = read_string(&args)?;
                    self.logfile = if logfile.is_empty() { None } else { Some(logfile) };
                }
                "include" => self.parsefile(&read_string(&args)?)?,
                other => {
                    return Err(ConfigError::InvalidParameter(format!(
                        "unknown configuration {:?}",
                        other
                    )))
                }
            };
        }

        self.validate()
    }

    /// Rejects settings that would corrupt a list.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let MaxLevel::Fixed(0) = self.max_level {
            return Err(ConfigError::InvalidParameter("max-level must be positive".to_owned()));
        }
        if !(self.probability > 0.0 && self.probability < 1.0) {
            return Err(ConfigError::InvalidParameter(format!(
                "probability {} is not in (0, 1)",
                self.probability
            )));
        }
        Ok(())
    }

    /// Builds the logger described by `loglevel` and `logfile`.
    pub fn logger(&self) -> Result<Logger, ConfigError> {
        match self.logfile {
            Some(ref path) => Ok(Logger::file(self.loglevel, path)?),
            None => Ok(Logger::new_err(self.loglevel)),
        }
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::new()
    }
}

impl From<IOError> for ConfigError {
    fn from(e: IOError) -> ConfigError {
        ConfigError::IOError(e)
    }
}

impl From<ParseIntError> for ConfigError {
    fn from(e: ParseIntError) -> ConfigError {
        ConfigError::InvalidParameter(e.to_string())
    }
}

impl From<ParseFloatError> for ConfigError {
    fn from(e: ParseFloatError) -> ConfigError {
        ConfigError::InvalidParameter(e.to_string())
    }
}
