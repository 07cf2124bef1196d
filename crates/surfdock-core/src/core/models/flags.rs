use std::fmt;

/// A single command-line option for the docking executable, e.g. `-nstruct 10`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagOption {
    pub name: String,
    pub values: Vec<String>,
}

impl FlagOption {
    pub fn switch(name: &str) -> Self {
        Self {
            name: normalize_name(name),
            values: Vec::new(),
        }
    }

    pub fn with_value(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: normalize_name(name),
            values: vec![value.into()],
        }
    }
}

impl fmt::Display for FlagOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for value in &self.values {
            write!(f, " {}", value)?;
        }
        Ok(())
    }
}

fn normalize_name(name: &str) -> String {
    let name = name.trim();
    if name.starts_with('-') {
        name.to_string()
    } else {
        format!("-{}", name)
    }
}

/// The newline-delimited option list handed to the executable as `@flags`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagsFile {
    pub options: Vec<FlagOption>,
}

impl FlagsFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, option: FlagOption) -> &mut Self {
        self.options.push(option);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FlagOption> {
        let name = normalize_name(name);
        self.options.iter().find(|o| o.name == name)
    }

    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(|o| o.values.first())
            .map(String::as_str)
    }

    pub fn option_names(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_names_are_normalized_with_a_leading_dash() {
        let mut flags = FlagsFile::new();
        flags
            .push(FlagOption::with_value("nstruct", "5"))
            .push(FlagOption::switch("-include_surfaces"));

        assert_eq!(flags.option_names(), vec!["-nstruct", "-include_surfaces"]);
        assert_eq!(flags.value_of("-nstruct"), Some("5"));
        assert_eq!(flags.value_of("include_surfaces"), None);
        assert_eq!(flags.options[0].to_string(), "-nstruct 5");
    }
}
