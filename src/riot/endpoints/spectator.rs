use crate::error::AppError;
use crate::riot::client::RiotClient;
use crate::riot::region::Platform;
use crate::riot::types::CurrentGameInfoDto;

impl RiotClient {
    /// Get the game a player is currently in, 404 when there is none
    /// Uses platform routing (euw1, na1, kr, etc.)
    pub async fn get_active_game(
        &self,
        platform: Platform,
        puuid: &str,
    ) -> Result<CurrentGameInfoDto, AppError> {
        let url = format!(
            "{}/lol/spectator/v5/active-games/by-summoner/{}",
            self.platform_url(platform),
            urlencoding::encode(puuid)
        );

        self.get(&url, &[]).await
    }
}
