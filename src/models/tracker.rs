use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Issue tracker the description markup is rendered for. Names match case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Tracker {
    #[default]
    Jira,
    Octane,
}

impl FromStr for Tracker {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if name.eq_ignore_ascii_case("jira") {
            Ok(Tracker::Jira)
        } else if name.eq_ignore_ascii_case("octane") {
            Ok(Tracker::Octane)
        } else {
            Err(format!("tracker '{name}' has not been configured"))
        }
    }
}

impl TryFrom<String> for Tracker {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl fmt::Display for Tracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tracker::Jira => f.write_str("jira"),
            Tracker::Octane => f.write_str("octane"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!("jira".parse::<Tracker>().unwrap(), Tracker::Jira);
        assert_eq!("JIRA".parse::<Tracker>().unwrap(), Tracker::Jira);
        assert_eq!("octane".parse::<Tracker>().unwrap(), Tracker::Octane);
        assert_eq!("OCTANE".parse::<Tracker>().unwrap(), Tracker::Octane);
    }

    #[test]
    fn unknown_tracker_is_rejected() {
        let err = "bugzilla".parse::<Tracker>().unwrap_err();
        assert_eq!(err, "tracker 'bugzilla' has not been configured");
        assert!(serde_yaml::from_str::<Tracker>("bugzilla").is_err());
        assert_eq!(serde_yaml::from_str::<Tracker>("Octane").unwrap(), Tracker::Octane);
    }
}
