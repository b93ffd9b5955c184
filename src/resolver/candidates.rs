use std::collections::BTreeSet;

use super::rules::{
    AGE_PAIR_LEADS, AGE_PAIR_TAILS, DRAGON_AGES, DRAGON_CATEGORY, ELEMENTAL_CATEGORY,
    ELEMENTAL_SIZES, LYCANTHROPE_CATEGORY, LYCANTHROPE_FORMS, ResolverRules,
};

/// Image file stem to look up, with the qualifier reported when it matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// File name without extension.
    pub stem: String,
    /// Name fragment dropped to form `stem`.
    pub qualifier: Option<String>,
}

/// Expand a catalog name into the ordered candidate stems of the resolution cascade.
///
/// The first candidate is always the name itself. Repeated stems are dropped; a stem that
/// was already tried cannot match later with a different qualifier.
pub fn generate_name_candidates(rules: &ResolverRules, name: &str) -> Vec<Candidate> {
    let mut builder = CandidateBuilder::new(name);

    builder.add_exact_candidate();
    builder.add_type_prefix_candidates(&rules.type_prefixes);
    builder.add_dragon_age_pair_candidate();
    builder.add_word_candidates();
    builder.add_lycanthrope_candidate();

    builder.result
}

struct CandidateBuilder<'a> {
    name: &'a str,
    words: Vec<&'a str>,
    seen: BTreeSet<String>,
    result: Vec<Candidate>,
}

impl<'a> CandidateBuilder<'a> {
    fn new(name: &'a str) -> Self {
        Self {
            name,
            words: name.split(' ').collect(),
            seen: BTreeSet::new(),
            result: Vec::new(),
        }
    }

    fn add_exact_candidate(&mut self) {
        self.push(self.name.to_string(), None);
    }

    fn add_type_prefix_candidates(&mut self, prefixes: &[String]) {
        for label in prefixes {
            self.push(format!("{label}, {}", self.name), None);
        }
    }

    fn add_dragon_age_pair_candidate(&mut self) {
        let &[lead, tail, ..] = self.words.as_slice() else {
            return;
        };
        if self.words.len() > 2 && AGE_PAIR_LEADS.contains(&lead) && AGE_PAIR_TAILS.contains(&tail)
        {
            let stem = format!("{DRAGON_CATEGORY}, {}", self.second_to_last());
            self.push(stem, Some(format!("{lead} {tail}")));
        }
    }

    fn add_word_candidates(&mut self) {
        if self.words.len() < 2 {
            return;
        }
        let first = self.words[0];

        self.push(format!("{}, {first}", self.words[1..].join(" ")), None);

        if DRAGON_AGES.contains(&first) {
            let stem = format!("{DRAGON_CATEGORY}, {}", self.second_to_last());
            self.push(stem, Some(first.to_string()));
        }

        if ELEMENTAL_SIZES.contains(&first) && self.words.last() == Some(&ELEMENTAL_CATEGORY) {
            let stem = format!("{ELEMENTAL_CATEGORY}, {}", self.second_to_last());
            self.push(stem, Some(first.to_string()));
        }

        self.push(
            format!("{}, {}", self.words[2..].join(" "), self.words[..2].join(" ")),
            None,
        );
    }

    fn add_lycanthrope_candidate(&mut self) {
        let parts: Vec<&str> = self.name.split(", ").collect();
        if parts.len() > 1 && LYCANTHROPE_FORMS.contains(&parts[1]) {
            self.push(format!("{LYCANTHROPE_CATEGORY}, {}", parts[0]), None);
        }
    }

    fn second_to_last(&self) -> &'a str {
        self.words[self.words.len().saturating_sub(2)]
    }

    fn push(&mut self, stem: String, qualifier: Option<String>) {
        if self.seen.insert(stem.clone()) {
            self.result.push(Candidate { stem, qualifier });
        }
    }
}
