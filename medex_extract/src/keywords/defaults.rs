//! Built-in keyword inventory for breast pathology and oncology notes.

use super::{KeywordDefs, KeywordSetDef, MentionDefs, ReceptorDefs};

impl Default for KeywordDefs {
    fn default() -> Self {
        Self {
            estrogen: estrogen(),
            progesterone: progesterone(),
            her2: her2(),
            p53: p53(),
            dcis: MentionDefs {
                mention: KeywordSetDef::literal(&["dcis"]),
                percent: Some(KeywordSetDef::regex(&[r"dcis is \d+ percent", "dcis"])),
            },
            surgical: MentionDefs {
                mention: KeywordSetDef::literal(&[
                    "s/p mastectomy",
                    "s/p hysterectomy",
                    "lumpectomy",
                    "biopsy",
                ]),
                percent: None,
            },
            menopause: MentionDefs {
                mention: KeywordSetDef::literal(&["menopause"]),
                percent: None,
            },
            age: KeywordSetDef::regex(&[
                r"\d+ yo female",
                r"\d+ yo woman",
                r"\d+yo female",
                r"\d+yo woman",
                r"\d+ y/o female",
                r"\d+ y/o woman",
                r"\d+y/o female",
                r"\d+y/o woman",
                r"\d+ year old female",
                r"\d+ year old woman",
                r"\d+-year-old woman",
                r"\d+yo f",
            ]),
            date_of_birth: KeywordSetDef::regex(&[
                r"birth date: \d+/\d+/\d+",
                r"date of birth: \d+/\d+/\d+",
                r"birth date: \d+-\d+-\d+",
                r"date of birth: \d+-\d+-\d+",
                r"dob: \d+/\d+/\d+",
                r"dob: \d+-\d+-\d+",
            ]),
            last_menstrual_period: KeywordSetDef::regex(&[
                r"lmp:\d+/\d+/\d+",
                r"lmp: \d+/\d+/\d+",
            ]),
            date_indicators: KeywordSetDef::literal(&["date:", "date", "on ", "date of scan:"]),
            full_dates: KeywordSetDef::regex(&[r"\d+/\d+/\d+", r"\d+-\d+-\d+"]),
            partial_dates: KeywordSetDef::regex(&[r"\d+/\d+"]),
        }
    }
}

fn estrogen() -> ReceptorDefs {
    ReceptorDefs {
        positive: KeywordSetDef::literal(&[
            "er/pr+",
            "er/pr +",
            "er/pr was positive",
            "er/pr is positive",
            "er/pr/her-2 positive",
            "er/pr/her-2 +",
            "estrogen receptor positive",
            "er/pr 70% positive",
            "er weakly positive",
            "er/pr-positive",
            "er: +",
            "er/pr: +",
            "er/pr/her-2: +",
            "er positive",
            "er: positive",
            "positive er/pr",
            "positive er",
        ]),
        negative: KeywordSetDef::literal(&[
            "er/pr -",
            "er/pr was negative",
            "er/pr is negative",
            "er/pr/her-2 negative",
            "er/pr/her-2 -",
            "er/pr/her2 negative",
            "er/pr her-2 negative",
            "er weakly negative",
            "er/pr-negative",
            "er: -",
            "er/pr: -",
            "er/pr/her-2: -",
            "er negative",
            "er: negative",
            "negative er/pr",
            "negative er",
        ]),
        percent: KeywordSetDef::regex(&[
            r"er \w+ \(\d+%\)",
            r"er \(\d+%\)",
            r"er \w+ \d+%",
            r"estrogen receptor \w+ \(\d+%\)",
            r"estrogen receptor \w+ \d+%",
            r"estrogen receptor \(\d+%\)",
            r"\d+% er",
            r"\d+ percent er",
            r"er \w+ \d+ percent",
            r"er \d+ percent",
            r"er: negative \(\d+%\)",
            r"er: positive \(\d+%\)",
        ]),
    }
}

fn progesterone() -> ReceptorDefs {
    ReceptorDefs {
        positive: KeywordSetDef::literal(&[
            "er/pr+",
            "er/pr +",
            "er/pr was positive",
            "er/pr is positive",
            "er/pr/her-2 positive",
            "er/pr/her-2 +",
            "estrogen receptor positive",
            "er/pr 70% positive",
            "pr weakly positive",
            "er/pr-positive",
            "pr: +",
            "er/pr: +",
            "er/pr/her-2: +",
            "pr positive",
            "pr: positive",
            "positive er/pr",
            "positive pr",
        ]),
        negative: KeywordSetDef::literal(&[
            "er/pr -",
            "er/pr was negative",
            "er/pr is negative",
            "er/pr/her-2 negative",
            "er/pr/her-2 -",
            "er/pr/her2 negative",
            "er/pr her-2 negative",
            "pr weakly negative",
            "er/pr-negative",
            "pr: -",
            "er/pr: -",
            "er/pr/her-2: -",
            "pr negative",
            "pr: negative",
            "negative er/pr",
            "negative pr",
        ]),
        percent: KeywordSetDef::regex(&[
            r"pr \w+ \(\d+%\)",
            r"pr \(\d+%\)",
            r"pr \w+ \d+%",
            r"progesterone receptor \w+ \(\d+%\)",
            r"progesterone receptor \w+ \d+%",
            r"progesterone receptor \(\d+%\)",
            r"\d+% pr",
            r"\d+ percent pr",
            r"pr \w+ \d+ percent",
            r"pr \d+ percent",
            r"pr: negative \(\d+%\)",
            r"pr: positive \(\d+%\)",
        ]),
    }
}

fn her2() -> ReceptorDefs {
    ReceptorDefs {
        positive: KeywordSetDef::literal(&[
            "er/pr/her-2 positive",
            "er/pr/her-2 +",
            "er/pr her-2 positive",
            "her2neu pos",
            "her2neu positive",
            "her 2 3+ positive",
            "her 2-positive",
            "her2 3+",
            "er/pr/her-2: +",
            "her-2/neu positive",
        ]),
        negative: KeywordSetDef::literal(&[
            "er/pr/her-2 negative",
            "er/pr/her-2 -",
            "er/pr her-2 negative",
            "her2neu neg",
            "her2neu negative",
            "her 2 2- negative",
            "her 2-negative",
            "er/pr/her-2: -",
            "her-2/neu negative",
        ]),
        percent: KeywordSetDef::regex(&[
            r"her-2 \w+ \(\d+%\)",
            r"her-2 \(\d+%\)",
            r"her-2 \w+ \d+%",
            r"her-2 receptor \w+ \(\d+%\)",
            r"her-2 receptor \w+ \d+%",
            r"her-2 receptor \(\d+%\)",
            r"\d+% her-2",
            r"\d+ percent her-2",
            r"her2 \w+ \(\d+%\)",
            r"her2/neu \w+ \(\d+%\)",
        ]),
    }
}

fn p53() -> ReceptorDefs {
    ReceptorDefs {
        positive: KeywordSetDef::literal(&["p53: positive", "p53 positive", "p53 is positive"]),
        negative: KeywordSetDef::literal(&["p53: negative", "p53 negative", "p53 is negative"]),
        percent: KeywordSetDef::regex(&[
            r"p53 \w+ \(\d+%\)",
            r"p53 \(\d+%\)",
            r"p53 \w+ \d+%",
            r"\d+% p53",
            r"\d+ percent p53",
            r"p53 \w+ \d+ percent",
            r"p53 \d+ percent",
            r"p53: negative \(\d+%\)",
            r"p53: positive \(\d+%\)",
        ]),
    }
}
