//! Translating the human-readable parts of a record for the public view.

#[cfg(test)]
#[path = "translation_test.rs"]
mod translation_test;

use crate::types::{InfoRecord, Language};

/// Language code that means "show the record as stored".
pub const ORIGINAL_LANGUAGE: &str = "en";

pub const NOTHING_TO_TRANSLATE_MESSAGE: &str = "No content available for translation.";

/// Record fields that are machine-translated. Dates, price, batch and
/// manufacturer stay as stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TranslatableField {
    MedicineName,
    Usage,
    Dosage,
    Drugs,
    Instr,
}

impl TranslatableField {
    pub const ALL: [Self; 5] = [Self::MedicineName, Self::Usage, Self::Dosage, Self::Drugs, Self::Instr];

    fn get(self, record: &InfoRecord) -> &str {
        match self {
            Self::MedicineName => &record.medicine_name,
            Self::Usage => &record.usage,
            Self::Dosage => &record.dosage,
            Self::Drugs => &record.drugs,
            Self::Instr => &record.instr,
        }
    }

    fn slot(self, record: &mut InfoRecord) -> &mut String {
        match self {
            Self::MedicineName => &mut record.medicine_name,
            Self::Usage => &mut record.usage,
            Self::Dosage => &mut record.dosage,
            Self::Drugs => &mut record.drugs,
            Self::Instr => &mut record.instr,
        }
    }
}

/// Texts to send for translation, in order, with the field each came from.
/// Blank fields are skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TranslationBatch {
    pub fields: Vec<TranslatableField>,
    pub texts: Vec<String>,
}

impl TranslationBatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

#[must_use]
pub fn translatable_texts(record: &InfoRecord) -> TranslationBatch {
    let mut batch = TranslationBatch::default();
    for field in TranslatableField::ALL {
        let text = field.get(record);
        if !text.trim().is_empty() {
            batch.fields.push(field);
            batch.texts.push(text.to_owned());
        }
    }
    batch
}

/// Copy of `record` with translated texts substituted field by field.
///
/// A missing or blank translation keeps the stored text.
#[must_use]
pub fn merge_translation(record: &InfoRecord, batch: &TranslationBatch, translated: &[String]) -> InfoRecord {
    let mut merged = record.clone();
    for (field, text) in batch.fields.iter().zip(translated) {
        if !text.trim().is_empty() {
            *field.slot(&mut merged) = text.clone();
        }
    }
    merged
}

/// Display name for `code`, or the code itself when unknown.
#[must_use]
pub fn language_name<'a>(languages: &'a [Language], code: &'a str) -> &'a str {
    languages
        .iter()
        .find(|lang| lang.code == code)
        .map_or(code, |lang| lang.name.as_str())
}

#[must_use]
pub fn translation_failed_message(languages: &[Language], code: &str) -> String {
    format!("Translation to {} failed. Showing original content.", language_name(languages, code))
}
