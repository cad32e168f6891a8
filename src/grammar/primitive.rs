use std::fs;
use std::path::{Path, PathBuf};

use simargs_combinator::prelude::*;
use time::OffsetDateTime;

use crate::model::{ApplicationDescriptor, Locale, Url};

/// The structural separator between actions, and the end of launch arguments.
pub const DASH_SEPARATOR: &str = "--";

pub fn of_int() -> Parser<i64> {
    Parser::single("Int", |token| {
        token
            .parse::<i64>()
            .map_err(|_| ParseError::could_not_interpret("Int", Some(token)))
    })
}

pub fn of_double() -> Parser<f64> {
    Parser::single("Double", |token| {
        token
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| ParseError::could_not_interpret("Double", Some(token)))
    })
}

/// Any token at all.
pub fn of_any() -> Parser<String> {
    Parser::single("String", |token| Ok(token.to_string()))
}

/// Any token other than the dash separator.
pub(crate) fn of_word() -> Parser<String> {
    Parser::single("String", |token| {
        if token == DASH_SEPARATOR {
            Err(ParseError::could_not_interpret("String", Some(token)))
        } else {
            Ok(token.to_string())
        }
    })
}

pub fn of_dash_separator() -> Parser<()> {
    Parser::of_string(DASH_SEPARATOR, ())
}

/// A device identifier in 8-4-4-4-12 hexadecimal form, yielded in upper case.
pub fn of_udid() -> Parser<String> {
    Parser::single("UDID", |token| {
        let groups: Vec<&str> = token.split('-').collect();
        let well_formed = groups.len() == 5
            && groups
                .iter()
                .zip([8, 4, 4, 4, 12])
                .all(|(group, length)| {
                    group.len() == length && group.chars().all(|c| c.is_ascii_hexdigit())
                });

        if well_formed {
            Ok(token.to_ascii_uppercase())
        } else {
            Err(ParseError::could_not_interpret("UDID", Some(token)))
        }
    })
}

pub fn of_url() -> Parser<Url> {
    Parser::single("URL", |token| {
        let valid = match token.split_once(':') {
            Some((scheme, rest)) => {
                let mut characters = scheme.chars();
                characters.next().map_or(false, |c| c.is_ascii_alphabetic())
                    && characters.all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c))
                    && !rest.is_empty()
            }
            None => false,
        };

        if valid {
            Ok(Url::new(token))
        } else {
            Err(ParseError::could_not_interpret("URL", Some(token)))
        }
    })
}

/// A locale identifier such as `en`, `en_US` or `zh-Hans_CN`.
pub fn of_locale() -> Parser<Locale> {
    Parser::single("Locale", |token| {
        let mut segments = token.split(['_', '-']);
        let language = segments.next().unwrap_or_default();
        let valid = (2..=3).contains(&language.len())
            && language.chars().all(|c| c.is_ascii_alphabetic())
            && segments.all(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric()));

        if valid {
            Ok(Locale::new(token))
        } else {
            Err(ParseError::could_not_interpret("Locale", Some(token)))
        }
    })
}

/// Seconds since the Unix epoch, possibly fractional.
pub fn of_date() -> Parser<OffsetDateTime> {
    Parser::single("Date", |token| {
        let interpret = || ParseError::could_not_interpret("Date", Some(token));
        let seconds = token
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite())
            .ok_or_else(interpret)?;
        OffsetDateTime::from_unix_timestamp_nanos((seconds * 1e9) as i128)
            .map_err(|_| interpret())
    })
}

pub fn of_directory() -> Parser<PathBuf> {
    Parser::single("A Directory", |token| {
        let path = existing_path(token)?;

        if path.is_dir() {
            Ok(path)
        } else {
            Err(ParseError::custom(format!(
                "'{token}' should be a directory, but isn't"
            )))
        }
    })
}

pub fn of_file() -> Parser<PathBuf> {
    Parser::single("A File", |token| {
        let path = existing_path(token)?;

        if path.is_file() {
            Ok(path)
        } else {
            Err(ParseError::custom(format!(
                "'{token}' should be a file, but isn't"
            )))
        }
    })
}

/// An executable, given by its path.
pub fn of_binary() -> Parser<PathBuf> {
    of_file().described("A Binary")
}

/// An `.app` bundle directory, identified by the `CFBundleIdentifier` of its `Info.plist`.
pub fn of_application() -> Parser<ApplicationDescriptor> {
    Parser::single("An Application", application)
}

/// A bundle identifier, either read from an application bundle or given directly.
pub fn of_bundle_id() -> Parser<String> {
    Parser::single("A Bundle ID", |token| match application(token) {
        Ok(descriptor) => Ok(descriptor.bundle_id),
        Err(_) if token.contains('.') => Ok(token.to_string()),
        Err(_) => Err(ParseError::custom(format!(
            "Bundle ID must contain a '.', but '{token}' doesn't"
        ))),
    })
}

fn existing_path(token: &str) -> Result<PathBuf, ParseError> {
    let path = PathBuf::from(token);

    if path.exists() {
        Ok(path)
    } else {
        Err(ParseError::custom(format!(
            "'{token}' should exist, but doesn't"
        )))
    }
}

fn application(token: &str) -> Result<ApplicationDescriptor, ParseError> {
    let path = existing_path(token)?;

    if !path.is_dir() || path.extension().map_or(true, |extension| extension != "app") {
        return Err(ParseError::custom(format!(
            "'{token}' should be an application bundle, but isn't"
        )));
    }

    let bundle_id = read_bundle_id(&path).ok_or_else(|| {
        ParseError::custom(format!(
            "'{token}' has no CFBundleIdentifier in its Info.plist"
        ))
    })?;

    Ok(ApplicationDescriptor { path, bundle_id })
}

// Only XML property lists are understood.
fn read_bundle_id(bundle: &Path) -> Option<String> {
    let plist = fs::read_to_string(bundle.join("Info.plist")).ok()?;
    let (_, after_key) = plist.split_once("<key>CFBundleIdentifier</key>")?;
    let (_, value) = after_key.trim_start().split_once("<string>")?;
    let (bundle_id, _) = value.split_once("</string>")?;
    let bundle_id = bundle_id.trim();

    if bundle_id.is_empty() {
        None
    } else {
        Some(bundle_id.to_string())
    }
}
