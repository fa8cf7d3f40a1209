//! Complaint letter composition
//!
//! Fills a fixed template with the bill's identity fields and the findings
//! the user chose to raise. No text generation happens here.

use crate::models::{DiscrepancyFinding, NormalizedBill};

/// Letter language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Hindi,
    English,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hindi => "hindi",
            Self::English => "english",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hindi" | "hi" => Ok(Self::Hindi),
            "english" | "en" => Ok(Self::English),
            _ => Err(format!("Unknown language: {} (use hindi or english)", s)),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compose a complaint letter addressed to the bill's discom
pub fn compose_letter(
    bill: &NormalizedBill,
    findings: &[DiscrepancyFinding],
    extra_context: &str,
    language: Language,
) -> String {
    let points = findings
        .iter()
        .map(|f| match language {
            Language::Hindi => format!("- {}", f.description_hindi),
            Language::English => format!("- {}", f.description),
        })
        .collect::<Vec<_>>()
        .join("\n");

    let extra = match extra_context.trim() {
        "" => "-",
        text => text,
    };

    match language {
        Language::Hindi => format!(
            "सेवा में,\n\
             {provider}\n\
             \n\
             विषय: बिजली बिल में विसंगति के संबंध में शिकायत (उपभोक्ता संख्या {id})\n\
             \n\
             महोदय/महोदया,\n\
             \n\
             मैं, {name} (उपभोक्ता संख्या: {id}), आपका ध्यान अपने बिजली बिल (बिल तिथि: {date}) \
             में पाई गई निम्नलिखित विसंगतियों की ओर दिलाना चाहता/चाहती हूँ:\n\
             \n\
             {points}\n\
             \n\
             कृपया इनकी जाँच कर बिल में आवश्यक सुधार करें।\n\
             अतिरिक्त विवरण: {extra}\n\
             \n\
             धन्यवाद,\n\
             {name}\n",
            provider = bill.provider_name,
            id = bill.consumer_id,
            name = bill.consumer_name,
            date = bill.billing_date,
            points = points,
            extra = extra,
        ),
        Language::English => format!(
            "To,\n\
             {provider}\n\
             \n\
             Subject: Complaint regarding discrepancies in electricity bill (Consumer ID {id})\n\
             \n\
             Dear Sir/Madam,\n\
             \n\
             I, {name} (Consumer ID: {id}), wish to bring to your attention the following \
             discrepancies in my electricity bill dated {date}:\n\
             \n\
             {points}\n\
             \n\
             I request you to review these and issue a corrected bill.\n\
             Additional details: {extra}\n\
             \n\
             Sincerely,\n\
             {name}\n",
            provider = bill.provider_name,
            id = bill.consumer_id,
            name = bill.consumer_name,
            date = bill.billing_date,
            points = points,
            extra = extra,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SENTINEL;

    fn sample_bill() -> NormalizedBill {
        NormalizedBill {
            consumer_id: "1002003004".to_string(),
            consumer_name: "Asha Verma".to_string(),
            sanctioned_load_kw: Some(1.0),
            units_consumed_kwh: Some(250.0),
            total_amount_payable: Some(4000.0),
            billing_date: "12-03-2024".to_string(),
            provider_name: "PVVNL".to_string(),
        }
    }

    #[test]
    fn test_language_parse() {
        assert_eq!("Hindi".parse::<Language>().unwrap(), Language::Hindi);
        assert_eq!("en".parse::<Language>().unwrap(), Language::English);
        assert!("tamil".parse::<Language>().is_err());
    }

    #[test]
    fn test_english_letter() {
        let findings = vec![
            DiscrepancyFinding::calc_error(2047.5, 4000.0, 48.81),
            DiscrepancyFinding::high_use(250.0),
        ];
        let letter = compose_letter(&sample_bill(), &findings, "Meter was replaced in January.", Language::English);

        assert!(letter.starts_with("To,\nPVVNL\n"));
        assert!(letter.contains("Consumer ID 1002003004"));
        assert!(letter.contains("I, Asha Verma (Consumer ID: 1002003004)"));
        assert!(letter.contains("dated 12-03-2024"));
        assert!(letter.contains(&format!("- {}", findings[0].description)));
        assert!(letter.contains(&format!("- {}", findings[1].description)));
        assert!(letter.contains("Additional details: Meter was replaced in January."));
        assert!(letter.trim_end().ends_with("Asha Verma"));
    }

    #[test]
    fn test_hindi_letter_uses_hindi_descriptions() {
        let findings = vec![DiscrepancyFinding::missing_load()];
        let letter = compose_letter(&sample_bill(), &findings, "", Language::Hindi);

        assert!(letter.starts_with("सेवा में,\nPVVNL\n"));
        assert!(letter.contains(&findings[0].description_hindi));
        assert!(!letter.contains(&findings[0].description));
        assert!(letter.contains("अतिरिक्त विवरण: -"));
    }

    #[test]
    fn test_only_given_findings_are_listed() {
        let selected = vec![DiscrepancyFinding::high_use(250.0)];
        let excluded = DiscrepancyFinding::calc_error(1000.0, 2000.0, 50.0);
        let letter = compose_letter(&sample_bill(), &selected, "", Language::English);

        assert!(letter.contains(&selected[0].description));
        assert!(!letter.contains(&excluded.description));
        assert_eq!(letter.lines().filter(|l| l.starts_with("- ")).count(), 1);
    }

    #[test]
    fn test_sentinel_fields_pass_through() {
        let mut bill = sample_bill();
        bill.provider_name = SENTINEL.to_string();
        let letter = compose_letter(&bill, &[], "", Language::English);
        assert!(letter.starts_with("To,\nN/A\n"));
    }
}
