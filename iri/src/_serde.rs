use super::Iri;
use serde::{
    de::{Error, Unexpected},
    Deserialize, Serialize,
};

impl<'a> Deserialize<'a> for Iri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'a>,
    {
        let inner = String::deserialize(deserializer)?;
        Iri::parse(&inner)
            .map_err(|_| D::Error::invalid_value(Unexpected::Str(&inner), &"valid IRI reference"))
    }
}

impl Serialize for Iri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Serialize, Deserialize)]
    struct MyTable {
        iri: Option<Iri>,
    }

    #[derive(Serialize, Deserialize)]
    struct MyUncheckedTable {
        iri: Option<String>,
    }

    #[test]
    fn valid_iri() {
        let data = MyUncheckedTable {
            iri: Some("http://example.org/?q#".into()),
        };
        let toml_str = toml::to_string(&data).unwrap();
        let data2 = toml::from_str::<MyTable>(&toml_str).unwrap();
        let iri = data2.iri.unwrap();
        assert_eq!(iri.query(), Some("q"));
        assert_eq!(iri.fragment(), Some(""));
        assert_eq!(data.iri.unwrap(), iri.to_string());
    }

    #[test]
    fn valid_relative_iri() {
        let data = MyUncheckedTable {
            iri: Some("#foo".into()),
        };
        let toml_str = toml::to_string(&data).unwrap();
        let data2 = toml::from_str::<MyTable>(&toml_str).unwrap();
        assert_eq!(data.iri.unwrap(), data2.iri.unwrap().to_string());
    }

    #[test]
    fn invalid_iri() {
        let data = MyUncheckedTable {
            iri: Some("a b".into()),
        };
        let toml_str = toml::to_string(&data).unwrap();
        let data2 = toml::from_str::<MyTable>(&toml_str);
        assert!(data2.is_err());
    }

    #[test]
    fn serialize_formats() {
        let data = MyTable {
            iri: Some(Iri::default().with_scheme("urn").with_path("x:y")),
        };
        let toml_str = toml::to_string(&data).unwrap();
        let data2 = toml::from_str::<MyUncheckedTable>(&toml_str).unwrap();
        assert_eq!(data2.iri.as_deref(), Some("urn:x:y"));
    }
}
