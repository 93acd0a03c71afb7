use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, ScrapeError};
use crate::types::PlayerRecord;
use crate::utils::{clean_string, element_text, strip_label_suffix};

const PLACE_OF_BIRTH: &str = "Place of birth";
const INTERNATIONAL: &str = "International";
const NATIONAL_PLAYER: &str = "National player";

/// One labelled entry of the profile's data banner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataField {
    pub value: String,
    /// `title` of the flag image inside the value, empty when there is none.
    pub country: String,
}

/// The data banner as an ordered label -> field mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerDataTable {
    fields: Vec<(String, DataField)>,
}

impl PlayerDataTable {
    /// Builds the table from parallel label/field sequences; a repeated label keeps its first field.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, DataField)>) -> Self {
        let mut table = Self::default();
        for (label, field) in pairs {
            if table.get(&label).is_none() {
                table.fields.push((label, field));
            }
        }
        table
    }

    pub fn get(&self, label: &str) -> Option<&DataField> {
        self.fields
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, field)| field)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(l, _)| l.as_str())
    }

    /// Renames whichever label denotes national-team affiliation to `International`.
    ///
    /// The first label containing "international" (any case) wins; a literal
    /// `National player` label is used only when there is no such label.
    pub fn canonicalize_international(&mut self) {
        let position = self
            .fields
            .iter()
            .position(|(l, _)| l.to_lowercase().contains("international"))
            .or_else(|| self.fields.iter().position(|(l, _)| l == NATIONAL_PLAYER));

        if let Some(idx) = position {
            self.fields[idx].0 = INTERNATIONAL.to_string();
        }
    }

    fn country_of(&self, label: &str) -> String {
        self.get(label)
            .map(|field| field.country.clone())
            .unwrap_or_default()
    }
}

pub struct PlayerPageParser {
    name_banner: Selector,
    heading: Selector,
    data_content: Selector,
    data_item: Selector,
    data_value: Selector,
    flag: Selector,
}

impl PlayerPageParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            name_banner: Selector::parse("div.dataName")?,
            heading: Selector::parse("h1")?,
            data_content: Selector::parse("div.dataContent")?,
            data_item: Selector::parse("span.dataItem")?,
            data_value: Selector::parse("span.dataValue")?,
            flag: Selector::parse("img.flaggenrahmen")?,
        })
    }

    pub fn parse(&self, html: &str) -> Result<PlayerRecord> {
        let document = Html::parse_document(html);

        let player_name = self.extract_player_name(&document)?;
        let mut table = self.extract_data_table(&document)?;
        table.canonicalize_international();

        Ok(PlayerRecord {
            player_name,
            country_birth: table.country_of(PLACE_OF_BIRTH),
            country_fifa: table.country_of(INTERNATIONAL),
        })
    }

    fn extract_player_name(&self, document: &Html) -> Result<String> {
        let banner = document
            .select(&self.name_banner)
            .next()
            .ok_or(ScrapeError::Structure {
                context: "div.dataName name banner",
            })?;
        banner
            .select(&self.heading)
            .next()
            .map(|h1| element_text(&h1))
            .ok_or(ScrapeError::Structure {
                context: "h1 inside div.dataName",
            })
    }

    pub fn extract_data_table(&self, document: &Html) -> Result<PlayerDataTable> {
        let content = document
            .select(&self.data_content)
            .next()
            .ok_or(ScrapeError::Structure {
                context: "div.dataContent data banner",
            })?;

        let labels = content
            .select(&self.data_item)
            .map(|item| strip_label_suffix(&item.text().collect::<String>()));
        let fields = content
            .select(&self.data_value)
            .map(|value| self.extract_field(value));

        Ok(PlayerDataTable::from_pairs(labels.zip(fields)))
    }

    fn extract_field(&self, value: ElementRef) -> DataField {
        let country = value
            .select(&self.flag)
            .next()
            .and_then(|img| img.value().attr("title"))
            .map(str::to_string)
            .unwrap_or_default();

        DataField {
            value: clean_string(&value.text().collect::<String>()),
            country,
        }
    }
}

/// Extracts one record from a saved player profile page.
pub fn parse_player_page(html: &str) -> Result<PlayerRecord> {
    PlayerPageParser::new()?.parse(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(name: &str, rows: &[(&str, &str, Option<&str>)]) -> String {
        let rows: String = rows
            .iter()
            .map(|(label, value, flag)| {
                let flag = flag
                    .map(|title| {
                        format!(r#"<img src="flag.png" title="{title}" alt="{title}" class="flaggenrahmen">"#)
                    })
                    .unwrap_or_default();
                format!(
                    r#"<p><span class="dataItem">{label}:</span> <span class="dataValue">{flag} {value}</span></p>"#
                )
            })
            .collect();
        format!(
            r#"<html><body>
            <div class="dataHeader">
              <div class="dataName"><h1>{name}</h1></div>
              <div class="dataContent">{rows}</div>
            </div>
            </body></html>"#
        )
    }

    #[test]
    fn test_missing_flag_gives_empty_country() {
        let html = page(
            "Someone",
            &[("Place of birth", "Unknown", None), ("Current international", "Brazil", Some("Brazil"))],
        );
        let record = parse_player_page(&html).unwrap();
        assert_eq!(record.country_birth, "");
        assert_eq!(record.country_fifa, "Brazil");
    }

    #[test]
    fn test_former_international_is_canonical() {
        let html = page(
            "Someone",
            &[
                ("Place of birth", "Lyon", Some("France")),
                ("Former International", "Algeria", Some("Algeria")),
            ],
        );
        let record = parse_player_page(&html).unwrap();
        assert_eq!(record.country_birth, "France");
        assert_eq!(record.country_fifa, "Algeria");
    }

    #[test]
    fn test_national_player_label_is_canonical() {
        let html = page("Someone", &[("National player", "Ghana", Some("Ghana"))]);
        assert_eq!(parse_player_page(&html).unwrap().country_fifa, "Ghana");
    }

    #[test]
    fn test_international_label_beats_national_player() {
        let mut table = PlayerDataTable::from_pairs(vec![
            (
                "National player".to_string(),
                DataField { value: "A".into(), country: "A".into() },
            ),
            (
                "Current international".to_string(),
                DataField { value: "B".into(), country: "B".into() },
            ),
        ]);
        table.canonicalize_international();
        assert_eq!(table.get(INTERNATIONAL).unwrap().country, "B");
        assert!(table.get(NATIONAL_PLAYER).is_some());
    }

    #[test]
    fn test_first_international_match_wins() {
        let mut table = PlayerDataTable::from_pairs(vec![
            (
                "Current international".to_string(),
                DataField { value: "Wales".into(), country: "Wales".into() },
            ),
            (
                "Former International".to_string(),
                DataField { value: "England U21".into(), country: "England".into() },
            ),
        ]);
        table.canonicalize_international();
        assert_eq!(
            table.labels().collect::<Vec<_>>(),
            vec![INTERNATIONAL, "Former International"]
        );
        assert_eq!(table.get(INTERNATIONAL).unwrap().country, "Wales");
    }

    #[test]
    fn test_repeated_label_keeps_first_value() {
        let table = PlayerDataTable::from_pairs(vec![
            ("Citizenship".to_string(), DataField { value: "Spain".into(), country: "Spain".into() }),
            ("Citizenship".to_string(), DataField { value: "Peru".into(), country: "Peru".into() }),
        ]);
        assert_eq!(table.get("Citizenship").unwrap().value, "Spain");
    }

    #[test]
    fn test_values_are_normalized() {
        let parser = PlayerPageParser::new().unwrap();
        let html = page("Someone", &[("Height", "1,88 \n  m", None)]);
        let table = parser.extract_data_table(&Html::parse_document(&html)).unwrap();
        assert_eq!(table.get("Height").unwrap().value, "1,88 m");
    }

    #[test]
    fn test_missing_name_banner_is_structure_error() {
        let html = r#"<html><body><div class="dataContent"></div></body></html>"#;
        let err = parse_player_page(html).unwrap_err();
        assert!(matches!(err, ScrapeError::Structure { .. }), "got {err:?}");
    }

    #[test]
    fn test_missing_data_content_is_structure_error() {
        let html = r#"<html><body><div class="dataName"><h1>Someone</h1></div></body></html>"#;
        let err = parse_player_page(html).unwrap_err();
        assert!(matches!(err, ScrapeError::Structure { .. }), "got {err:?}");
    }
}
