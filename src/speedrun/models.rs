use serde::Deserialize;

use crate::prelude::*;

/// Localised name variants; the international one is what we display.
#[derive(Deserialize, Debug, Clone)]
pub struct Names {
    pub international: String,
}

/// Speedrun.com game.
#[derive(Deserialize, Debug, Clone)]
pub struct Game {
    pub id: String,
    pub names: Names,

    /// Release year.
    pub released: i32,

    /// Platform IDs, resolvable via the platforms endpoint.
    #[serde(default)]
    pub platforms: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Category variable together with its admissible values.
#[derive(Deserialize, Debug, Clone)]
pub struct Variable {
    pub id: String,
    pub name: String,
    pub values: VariableValues,
}

#[derive(Deserialize, Debug, Clone)]
pub struct VariableValues {
    #[serde(rename = "values")]
    pub by_id: AHashMap<String, VariableValue>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct VariableValue {
    pub label: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Platform {
    pub name: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct User {
    pub names: Names,
}

/// Raw run entry as returned by the runs endpoint.
#[derive(Deserialize, Debug, Clone)]
pub struct RawRun {
    pub id: String,

    /// Submission timestamp; missing on some historical runs.
    pub submitted: Option<String>,

    #[serde(default)]
    pub players: Vec<RunPlayer>,

    pub times: RunTimes,
}

/// Participant reference on a run: a registered user or an anonymous guest.
#[derive(Deserialize, Debug, Clone)]
pub struct RunPlayer {
    pub rel: String,

    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,
}

/// Named duration metrics in seconds; `realtime_t` is the ranking metric.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct RunTimes {
    #[serde(default)]
    pub primary_t: f64,

    #[serde(default)]
    pub realtime_t: f64,

    #[serde(default)]
    pub realtime_noloads_t: f64,

    #[serde(default)]
    pub ingame_t: f64,
}

impl RawRun {
    /// Registered-user participant IDs. Guest entries carry no stable
    /// identifier and are dropped here, so a guests-only run yields an empty
    /// team and never enters record tracking.
    #[must_use]
    pub fn player_ids(&self) -> Vec<String> {
        self.players
            .iter()
            .filter(|player| player.rel == "user")
            .filter_map(|player| player.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_run_ok() -> Result {
        let run = serde_json::from_str::<RawRun>(
            // language=json
            r#"{"id":"z5e01x8m","weblink":"https://www.speedrun.com/smb1/run/z5e01x8m","game":"om1m3625","category":"w20w1lzd","submitted":"2021-09-12T01:39:39Z","players":[{"rel":"user","id":"j4r6pwm8","uri":"https://www.speedrun.com/api/v1/users/j4r6pwm8"}],"times":{"primary":"PT4M54.948S","primary_t":294.948,"realtime":"PT4M54.948S","realtime_t":294.948,"realtime_noloads":null,"realtime_noloads_t":0,"ingame":null,"ingame_t":0}}"#,
        )?;
        assert_eq!(run.id, "z5e01x8m");
        assert_eq!(run.submitted.as_deref(), Some("2021-09-12T01:39:39Z"));
        assert_eq!(run.times.realtime_t, 294.948);
        assert_eq!(run.times.primary_t, 294.948);
        assert_eq!(run.times.ingame_t, 0.0);
        assert_eq!(run.times.realtime_noloads_t, 0.0);
        assert_eq!(run.player_ids(), vec!["j4r6pwm8".to_string()]);
        Ok(())
    }

    #[test]
    fn player_ids_skip_guests_ok() -> Result {
        let run = serde_json::from_str::<RawRun>(
            // language=json
            r#"{"id":"y8d3yvem","submitted":"2019-03-01T10:00:00Z","players":[{"rel":"guest","name":"Grandma"},{"rel":"user","id":"18qy25vj"}],"times":{"realtime_t":615.0}}"#,
        )?;
        assert_eq!(run.players[0].name.as_deref(), Some("Grandma"));
        assert_eq!(run.player_ids(), vec!["18qy25vj".to_string()]);
        Ok(())
    }

    #[test]
    fn parse_game_ok() -> Result {
        let game = serde_json::from_str::<Game>(
            // language=json
            r#"{"id":"om1m3625","names":{"international":"Super Mario Bros.","japanese":"スーパーマリオブラザーズ"},"released":1985,"platforms":["nzelreqp","w89rwelk"]}"#,
        )?;
        assert_eq!(game.names.international, "Super Mario Bros.");
        assert_eq!(game.released, 1985);
        assert_eq!(game.platforms.len(), 2);
        Ok(())
    }

    #[test]
    fn parse_variable_ok() -> Result {
        let variable = serde_json::from_str::<Variable>(
            // language=json
            r#"{"id":"38dj2ex8","name":"Console Region","values":{"values":{"rqv4kr2q":{"label":"NTSC"},"5q8e86rq":{"label":"PAL"}}}}"#,
        )?;
        assert_eq!(variable.name, "Console Region");
        assert_eq!(variable.values.by_id["rqv4kr2q"].label, "NTSC");
        assert_eq!(variable.values.by_id["5q8e86rq"].label, "PAL");
        Ok(())
    }
}
