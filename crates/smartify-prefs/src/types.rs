use serde::{Deserialize, Serialize};

/// One of the three independently togglable digest capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleKey {
    JobsAu,
    JobsIn,
    AiTools,
}

impl ToggleKey {
    /// All keys in digest section order (AU jobs, IN jobs, AI tools).
    /// This order is load-bearing: digest assembly iterates it directly.
    pub const ALL: [ToggleKey; 3] = [ToggleKey::JobsAu, ToggleKey::JobsIn, ToggleKey::AiTools];

    /// Button label shown in the subscribe keyboard.
    pub fn label(&self) -> &'static str {
        match self {
            ToggleKey::JobsAu => "Jobs AU",
            ToggleKey::JobsIn => "Jobs IN",
            ToggleKey::AiTools => "AI Tools",
        }
    }
}

impl std::fmt::Display for ToggleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ToggleKey::JobsAu => "jobs_au",
            ToggleKey::JobsIn => "jobs_in",
            ToggleKey::AiTools => "ai_tools",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for ToggleKey {
    type Err = crate::error::PrefsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "jobs_au" => Ok(ToggleKey::JobsAu),
            "jobs_in" => Ok(ToggleKey::JobsIn),
            "ai_tools" => Ok(ToggleKey::AiTools),
            other => Err(crate::error::PrefsError::UnknownToggleKey(other.to_string())),
        }
    }
}

/// The three digest flags. Plain value type — cheap to copy, no identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefFlags {
    pub jobs_au: bool,
    pub jobs_in: bool,
    pub ai_tools: bool,
}

impl PrefFlags {
    pub fn get(&self, key: ToggleKey) -> bool {
        match key {
            ToggleKey::JobsAu => self.jobs_au,
            ToggleKey::JobsIn => self.jobs_in,
            ToggleKey::AiTools => self.ai_tools,
        }
    }

    /// Return a copy with `key` flipped. The original is untouched.
    pub fn with_toggled(mut self, key: ToggleKey) -> Self {
        match key {
            ToggleKey::JobsAu => self.jobs_au = !self.jobs_au,
            ToggleKey::JobsIn => self.jobs_in = !self.jobs_in,
            ToggleKey::AiTools => self.ai_tools = !self.ai_tools,
        }
        self
    }

    pub fn any(&self) -> bool {
        self.jobs_au || self.jobs_in || self.ai_tools
    }

    /// Comma-joined names of the enabled flags, or "(none)".
    /// Used verbatim in the save/subscribe confirmation messages.
    pub fn summary(&self) -> String {
        let enabled: Vec<String> = ToggleKey::ALL
            .iter()
            .filter(|k| self.get(**k))
            .map(|k| k.to_string())
            .collect();
        if enabled.is_empty() {
            "(none)".to_string()
        } else {
            enabled.join(", ")
        }
    }

    /// Pack into a 3-bit mask (bit 0 = jobs_au, bit 1 = jobs_in,
    /// bit 2 = ai_tools). The working snapshot travels through Telegram
    /// callback data in this form.
    pub fn to_bits(&self) -> u8 {
        (self.jobs_au as u8) | (self.jobs_in as u8) << 1 | (self.ai_tools as u8) << 2
    }

    /// Inverse of [`to_bits`](Self::to_bits). High bits are ignored.
    pub fn from_bits(bits: u8) -> Self {
        Self {
            jobs_au: bits & 0b001 != 0,
            jobs_in: bits & 0b010 != 0,
            ai_tools: bits & 0b100 != 0,
        }
    }
}

/// A user's stored preference record.
///
/// Created on first interaction with all flags false; never deleted —
/// unsubscribing just clears the flags and keeps the row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Telegram user ID. Stable and unique.
    pub user_id: i64,
    pub flags: PrefFlags,
    /// IANA zone name.
    pub timezone: String,
}

/// Partial update merged into a stored record by [`crate::PrefStore::upsert`].
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct PrefUpdate {
    pub jobs_au: Option<bool>,
    pub jobs_in: Option<bool>,
    pub ai_tools: Option<bool>,
    pub timezone: Option<String>,
}

impl PrefUpdate {
    /// Update that only touches the record's existence (first-contact upsert).
    pub fn none() -> Self {
        Self::default()
    }

    /// Update a single flag.
    pub fn flag(key: ToggleKey, value: bool) -> Self {
        let mut update = Self::default();
        match key {
            ToggleKey::JobsAu => update.jobs_au = Some(value),
            ToggleKey::JobsIn => update.jobs_in = Some(value),
            ToggleKey::AiTools => update.ai_tools = Some(value),
        }
        update
    }

    /// Replace all three flags at once.
    pub fn flags(flags: PrefFlags) -> Self {
        Self {
            jobs_au: Some(flags.jobs_au),
            jobs_in: Some(flags.jobs_in),
            ai_tools: Some(flags.ai_tools),
            timezone: None,
        }
    }

    pub fn timezone(zone: &str) -> Self {
        Self {
            timezone: Some(zone.to_string()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_round_trip() {
        for bits in 0..8u8 {
            assert_eq!(PrefFlags::from_bits(bits).to_bits(), bits);
        }
    }

    #[test]
    fn high_bits_are_ignored() {
        assert_eq!(PrefFlags::from_bits(0b1111_1010).to_bits(), 0b010);
    }

    #[test]
    fn summary_lists_enabled_in_fixed_order() {
        let flags = PrefFlags {
            jobs_au: true,
            jobs_in: false,
            ai_tools: true,
        };
        assert_eq!(flags.summary(), "jobs_au, ai_tools");
    }

    #[test]
    fn summary_placeholder_when_none_enabled() {
        assert_eq!(PrefFlags::default().summary(), "(none)");
    }

    #[test]
    fn toggle_key_display_from_str_round_trip() {
        for key in ToggleKey::ALL {
            let parsed: ToggleKey = key.to_string().parse().unwrap();
            assert_eq!(parsed, key);
        }
        assert!("jobs_us".parse::<ToggleKey>().is_err());
    }
}
