//! Projection of a marked-up value into the text the user sees

use super::template::Template;
use regex::Captures;

/// Replace every mention in `value` with its (transformed) display text.
pub fn get_plain_text(value: &str, template: &Template) -> String {
    template
        .pattern()
        .replace_all(value, |captures: &Captures<'_>| {
            let (id, display, mention_type) = template.extract(captures);
            template.display_for(id, display, mention_type).into_owned()
        })
        .into_owned()
}
