use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// One `<integer><unit>` component of an ISO-8601 time section, eg. "12M".
regex!(DURATION_COMPONENT_REGEX, r"(\d+)(\D)");
