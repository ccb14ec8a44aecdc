use serde::Deserialize;

use super::repo_types::{NewCharacter, NewPlanet};
use crate::error::{ApiError, ApiResult};

fn need<T>(value: Option<T>, field: &str) -> ApiResult<T> {
    value.ok_or_else(|| ApiError::bad_request(format!("You need to specify the {}", field)))
}

/// Column widths of the text fields in the catalog tables.
const NAME_LEN: usize = 250;
const COLOR_LEN: usize = 100;

fn need_text(value: Option<String>, field: &str, max: usize) -> ApiResult<String> {
    let value = need(value.filter(|v| !v.trim().is_empty()), field)?;
    if value.chars().count() > max {
        return Err(ApiError::bad_request(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(value)
}

#[derive(Debug, Deserialize)]
pub struct CreatePlanetRequest {
    pub name: Option<String>,
    pub climate: Option<String>,
    pub diameter: Option<i32>,
    pub orbital_period: Option<i32>,
    pub population: Option<i64>,
}

impl CreatePlanetRequest {
    /// Checks fields in a fixed order and reports the first one missing.
    pub fn validate(self) -> ApiResult<NewPlanet> {
        let name = need_text(self.name, "name", NAME_LEN)?;
        let climate = need_text(self.climate, "climate", NAME_LEN)?;
        let diameter = need(self.diameter, "diameter")?;
        let orbital_period = need(self.orbital_period, "orbital_period")?;
        let population = need(self.population, "population")?;
        Ok(NewPlanet {
            name,
            climate,
            population,
            orbital_period,
            diameter,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCharacterRequest {
    pub name: Option<String>,
    pub birth_year: Option<String>,
    pub height: Option<i32>,
    pub skin_color: Option<String>,
    pub eye_color: Option<String>,
}

impl CreateCharacterRequest {
    pub fn validate(self) -> ApiResult<NewCharacter> {
        let name = need_text(self.name, "name", NAME_LEN)?;
        let birth_year = need_text(self.birth_year, "birth_year", NAME_LEN)?;
        let height = need(self.height, "height")?;
        let skin_color = need_text(self.skin_color, "skin_color", COLOR_LEN)?;
        let eye_color = need_text(self.eye_color, "eye_color", COLOR_LEN)?;
        Ok(NewCharacter {
            name,
            birth_year,
            height,
            skin_color,
            eye_color,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn planet_reports_first_missing_field() {
        let req: CreatePlanetRequest =
            serde_json::from_value(json!({"name": "Tatooine", "climate": "arid"})).unwrap();
        let err = req.validate().unwrap_err();
        assert_eq!(err.to_string(), "You need to specify the diameter");
    }

    #[test]
    fn complete_planet_validates() {
        let req: CreatePlanetRequest = serde_json::from_value(json!({
            "name": "Hoth", "climate": "frozen", "diameter": 7200,
            "orbital_period": 549, "population": 0
        }))
        .unwrap();
        let planet = req.validate().unwrap();
        assert_eq!(planet.name, "Hoth");
        assert_eq!(planet.orbital_period, 549);
    }

    #[test]
    fn blank_character_name_counts_as_missing() {
        let req: CreateCharacterRequest = serde_json::from_value(json!({
            "name": " ", "birth_year": "19BBY", "height": 172,
            "skin_color": "fair", "eye_color": "blue"
        }))
        .unwrap();
        assert_eq!(req.validate().unwrap_err().to_string(), "You need to specify the name");
    }

    #[test]
    fn over_long_text_is_rejected() {
        let req: CreatePlanetRequest = serde_json::from_value(json!({
            "name": "x".repeat(251), "climate": "arid", "diameter": 1,
            "orbital_period": 1, "population": 1
        }))
        .unwrap();
        assert_eq!(req.validate().unwrap_err().to_string(), "name must be at most 250 characters");

        let req: CreateCharacterRequest = serde_json::from_value(json!({
            "name": "Chewbacca", "birth_year": "200BBY", "height": 228,
            "skin_color": "brown", "eye_color": "b".repeat(101)
        }))
        .unwrap();
        let err = req.validate().unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "eye_color must be at most 100 characters");
    }

    #[test]
    fn text_at_column_width_is_accepted() {
        let req: CreateCharacterRequest = serde_json::from_value(json!({
            "name": "ü".repeat(250), "birth_year": "19BBY", "height": 172,
            "skin_color": "s".repeat(100), "eye_color": "blue"
        }))
        .unwrap();
        assert!(req.validate().is_ok());
    }
}
