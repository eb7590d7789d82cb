//! Language detection and the failure message catalog
//!
//! The client language only affects the text of [`Failure`](crate::Failure)
//! messages. Failure kinds are never localized.

use crate::error::ErrorKind;

/// Language used when neither the caller nor the environment provides a usable one
pub const FALLBACK_LANGUAGE: &str = "en";

/// Languages with a translated message catalog
pub const SUPPORTED_LANGUAGES: [&str; 7] = ["en", "fr", "de", "es", "it", "pt", "ja"];

/// Environment variables consulted for the preferred language, in priority order
const LANGUAGE_VARIABLES: [&str; 4] = ["LANGUAGE", "LC_ALL", "LC_MESSAGES", "LANG"];

/// Normalize a locale tag to its lowercase primary language subtag
///
/// Accepts POSIX (`fr_FR.UTF-8`), BCP 47 (`pt-BR`) and bare (`DE`) forms.
/// Returns `None` for the `C`/`POSIX` locales and anything that is not a two or
/// three letter language code.
pub fn normalize(tag: &str) -> Option<String> {
    let primary = tag
        .trim()
        .split(['_', '-', '.', '@'])
        .next()
        .unwrap_or_default();

    if primary.eq_ignore_ascii_case("c") || primary.eq_ignore_ascii_case("posix") {
        return None;
    }

    if (2..=3).contains(&primary.len()) && primary.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(primary.to_ascii_lowercase())
    } else {
        None
    }
}

/// Preferred language of the host environment
pub fn preferred_language() -> String {
    preferred_language_from(|key| std::env::var(key).ok())
}

/// Preferred language resolved through an arbitrary variable lookup
///
/// `LANGUAGE` may hold a colon-separated preference list; its first usable entry
/// wins. Falls back to [`FALLBACK_LANGUAGE`].
pub fn preferred_language_from<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    LANGUAGE_VARIABLES
        .iter()
        .filter_map(|key| lookup(key))
        .flat_map(|value| {
            value
                .split(':')
                .filter_map(normalize)
                .collect::<Vec<_>>()
        })
        .next()
        .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string())
}

/// Resolve an optional explicit language, falling back to the environment
pub fn resolve(language: Option<&str>) -> String {
    match language.and_then(normalize) {
        Some(language) => language,
        None => {
            if let Some(raw) = language {
                tracing::debug!(language = raw, "ignoring unusable language identifier");
            }
            preferred_language()
        }
    }
}

/// Localized message for a failure kind
///
/// Unknown languages use the English catalog.
pub fn message(kind: ErrorKind, language: &str) -> &'static str {
    use ErrorKind::*;

    match (language, kind) {
        ("fr", InvalidIdentifier) => "L’identifiant de la vidéo est invalide.",
        ("fr", NetworkError) => "Impossible de joindre le service vidéo.",
        ("fr", NoStreamAvailable) => "Cette vidéo n’est pas disponible.",
        ("fr", RemoteRejected) => "La lecture de cette vidéo est restreinte.",
        ("fr", UnexpectedResponse) => "Le service vidéo a renvoyé une réponse inattendue.",

        ("de", InvalidIdentifier) => "Die Video-ID ist ungültig.",
        ("de", NetworkError) => "Der Videodienst ist nicht erreichbar.",
        ("de", NoStreamAvailable) => "Dieses Video ist nicht verfügbar.",
        ("de", RemoteRejected) => "Die Wiedergabe dieses Videos ist eingeschränkt.",
        ("de", UnexpectedResponse) => "Der Videodienst hat eine unerwartete Antwort geliefert.",

        ("es", InvalidIdentifier) => "El identificador del vídeo no es válido.",
        ("es", NetworkError) => "No se puede contactar con el servicio de vídeo.",
        ("es", NoStreamAvailable) => "Este vídeo no está disponible.",
        ("es", RemoteRejected) => "La reproducción de este vídeo está restringida.",
        ("es", UnexpectedResponse) => "El servicio de vídeo devolvió una respuesta inesperada.",

        ("it", InvalidIdentifier) => "L’identificativo del video non è valido.",
        ("it", NetworkError) => "Impossibile contattare il servizio video.",
        ("it", NoStreamAvailable) => "Questo video non è disponibile.",
        ("it", RemoteRejected) => "La riproduzione di questo video è limitata.",
        ("it", UnexpectedResponse) => "Il servizio video ha restituito una risposta inattesa.",

        ("pt", InvalidIdentifier) => "O identificador do vídeo é inválido.",
        ("pt", NetworkError) => "Não foi possível contactar o serviço de vídeo.",
        ("pt", NoStreamAvailable) => "Este vídeo não está disponível.",
        ("pt", RemoteRejected) => "A reprodução deste vídeo está restrita.",
        ("pt", UnexpectedResponse) => "O serviço de vídeo devolveu uma resposta inesperada.",

        ("ja", InvalidIdentifier) => "動画IDが無効です。",
        ("ja", NetworkError) => "動画サービスに接続できません。",
        ("ja", NoStreamAvailable) => "この動画は利用できません。",
        ("ja", RemoteRejected) => "この動画の再生は制限されています。",
        ("ja", UnexpectedResponse) => "動画サービスから予期しない応答がありました。",

        (_, InvalidIdentifier) => "The video identifier is invalid.",
        (_, NetworkError) => "The video service could not be reached.",
        (_, NoStreamAvailable) => "This video is unavailable.",
        (_, RemoteRejected) => "Playback of this video is restricted.",
        (_, UnexpectedResponse) => "The video service returned an unexpected response.",
    }
}
