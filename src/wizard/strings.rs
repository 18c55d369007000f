// ABOUTME: Translation table for wizard labels
// Lookups fall back to English, then to the key itself

/// A selectable interface language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

pub const LANGUAGES: &[Language] = &[
    Language { code: "EN", name: "English" },
    Language { code: "DE", name: "Deutsch" },
    Language { code: "FR", name: "Français" },
    Language { code: "NL", name: "Nederlands" },
];

pub const DEFAULT_LANGUAGE: &str = "EN";

const EN: &[(&str, &str)] = &[
    ("wizard_title", "Server Setup Wizard"),
    ("previous", "Back"),
    ("next", "Next"),
    ("finish", "Finish"),
    ("cancel", "Cancel"),
    ("verify", "Verify account"),
    ("page.welcome", "Welcome"),
    ("page.proxy", "Proxy"),
    ("page.sqn", "Online Account"),
    ("page.source", "Music Source"),
    ("page.audiodir", "Music Folder"),
    ("page.playlistdir", "Playlist Folder"),
    ("page.itunes", "iTunes"),
    ("page.musicip", "MusicIP"),
    ("page.summary", "Summary"),
    ("intro.welcome", "This wizard configures your music server. Choose a language to begin."),
    ("intro.proxy", "Enter the proxy server used to reach the internet (host:port)."),
    ("intro.sqn", "Enter your online account details. They are verified when you leave this page."),
    ("intro.source", "Choose where your music comes from."),
    ("intro.audiodir", "Select the folder that contains your music files."),
    ("intro.playlistdir", "Select the folder where playlists are stored."),
    ("intro.itunes", "Select your iTunes library XML file."),
    ("intro.musicip", "MusicIP mixing will be enabled for your library."),
    ("intro.summary", "Review your settings and press Finish to save them."),
    ("language", "Language"),
    ("webproxy", "Proxy server"),
    ("sn_email", "Email address"),
    ("sn_password", "Password"),
    ("useAudiodir", "Use a music folder"),
    ("itunes", "Use iTunes library"),
    ("musicmagic", "Use MusicIP"),
    ("audiodir", "Music folder"),
    ("playlistdir", "Playlist folder"),
    ("xml_file", "iTunes library file"),
    ("account_verified", "Account verified"),
    ("account_unverified", "Account not verified"),
];

const DE: &[(&str, &str)] = &[
    ("wizard_title", "Server-Einrichtungsassistent"),
    ("previous", "Zurück"),
    ("next", "Weiter"),
    ("finish", "Fertigstellen"),
    ("cancel", "Abbrechen"),
    ("verify", "Konto prüfen"),
    ("page.welcome", "Willkommen"),
    ("page.proxy", "Proxy"),
    ("page.sqn", "Online-Konto"),
    ("page.source", "Musikquelle"),
    ("page.audiodir", "Musikordner"),
    ("page.playlistdir", "Wiedergabelistenordner"),
    ("page.summary", "Zusammenfassung"),
    ("language", "Sprache"),
    ("webproxy", "Proxyserver"),
    ("sn_email", "E-Mail-Adresse"),
    ("sn_password", "Passwort"),
    ("useAudiodir", "Musikordner verwenden"),
    ("itunes", "iTunes-Mediathek verwenden"),
    ("musicmagic", "MusicIP verwenden"),
    ("audiodir", "Musikordner"),
    ("playlistdir", "Wiedergabelistenordner"),
    ("xml_file", "iTunes-Mediathekdatei"),
    ("account_verified", "Konto bestätigt"),
    ("account_unverified", "Konto nicht bestätigt"),
];

const FR: &[(&str, &str)] = &[
    ("wizard_title", "Assistant de configuration du serveur"),
    ("previous", "Précédent"),
    ("next", "Suivant"),
    ("finish", "Terminer"),
    ("cancel", "Annuler"),
    ("page.welcome", "Bienvenue"),
    ("page.source", "Source musicale"),
    ("page.summary", "Résumé"),
    ("language", "Langue"),
    ("sn_email", "Adresse e-mail"),
    ("sn_password", "Mot de passe"),
];

const NL: &[(&str, &str)] = &[
    ("wizard_title", "Server-installatiewizard"),
    ("previous", "Vorige"),
    ("next", "Volgende"),
    ("finish", "Voltooien"),
    ("page.welcome", "Welkom"),
    ("page.summary", "Overzicht"),
    ("language", "Taal"),
];

fn table(code: &str) -> &'static [(&'static str, &'static str)] {
    match code.to_ascii_uppercase().as_str() {
        "DE" => DE,
        "FR" => FR,
        "NL" => NL,
        _ => EN,
    }
}

fn find(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Label lookup for one language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strings {
    language: String,
}

impl Strings {
    pub fn new(language: &str) -> Self {
        let language = if is_supported(language) {
            language.to_ascii_uppercase()
        } else {
            DEFAULT_LANGUAGE.to_string()
        };
        Self { language }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn get<'a>(&self, key: &'a str) -> &'a str {
        find(table(&self.language), key)
            .or_else(|| find(EN, key))
            .unwrap_or(key)
    }

    pub fn page_title(&self, page_id: &str) -> String {
        let key = format!("page.{page_id}");
        find(table(&self.language), &key)
            .or_else(|| find(EN, &key))
            .map_or_else(|| page_id.to_string(), str::to_string)
    }

    pub fn page_intro(&self, page_id: &str) -> Option<&'static str> {
        let key = format!("intro.{page_id}");
        find(table(&self.language), &key).or_else(|| find(EN, &key))
    }
}

impl Default for Strings {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

pub fn is_supported(code: &str) -> bool {
    LANGUAGES.iter().any(|l| l.code.eq_ignore_ascii_case(code))
}
