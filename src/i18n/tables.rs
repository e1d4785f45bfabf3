// Static UI strings per locale.
pub(super) const EN: &[(&str, &str)] = &[
    ("configTitle", "Mirage UI Configuration"),
    ("livePreview", "Mirage Live Preview"),
    ("previewCardTitle", "Mirage Card Preview"),
    ("previewCardContent", "This is a preview of your current settings."),
    ("example", "Example"),
    ("presets", "Presets"),
    ("loadPreset", "Load Preset"),
    ("defaultPresets", "Default Presets"),
    ("myPresets", "My Presets"),
    ("undo", "Undo"),
    ("deletePreset", "Delete \"{presetName}\""),
    ("saveCurrentStyle", "Save Current Style"),
    ("newPresetPlaceholder", "New preset name..."),
    ("save", "Save"),
    ("theme", "Theme"),
    ("mode", "Mode"),
    ("light", "Light"),
    ("dark", "Dark"),
    ("cardStyle", "Card Style"),
    ("glass", "Glass"),
    ("solid", "Solid"),
    ("paper", "Paper"),
    ("floating", "Floating"),
    ("blurIntensity", "Blur Intensity"),
    ("transparency", "Transparency"),
    ("grayness", "Grayness"),
    ("backgroundColor", "Background Color"),
    ("opacity", "Opacity"),
    ("appearance", "Appearance"),
    ("borderRadius", "Border Radius"),
    ("borderWidth", "Border Width"),
    ("separatorWidth", "Separator Width"),
    ("cardTextColor", "Card Text Color"),
    ("auto", "Auto"),
    ("fontStyle", "Font Style"),
    ("system", "System"),
    ("serif", "Serif"),
    ("mono", "Mono"),
    ("animations", "Animations"),
    ("colors", "Colors"),
    ("accentColor", "Accent Color"),
    ("temperature", "Temperature"),
    ("weather", "Weather"),
    ("humidity", "Humidity"),
    ("door", "Door"),
    ("backgrounds", "Backgrounds"),
    ("darkThemeBgImage", "Dark Theme Background Image"),
    ("darkThemeBgColor", "Dark Theme Background Color"),
    ("lightThemeBgImage", "Light Theme Background Image"),
    ("lightThemeBgColor", "Light Theme Background Color"),
    ("uploadImage", "Upload Image"),
    ("localImageSelected", "Local Image Selected"),
    ("change", "Change"),
    ("clear", "Clear"),
    ("bgNote", "Note: An uploaded image will always take precedence over a background color."),
    ("advanced", "Advanced"),
    ("export", "Export"),
    ("import", "Import"),
    ("settingsCopied", "Settings copied to clipboard!"),
    ("pasteSettingsPrompt", "Paste your Mirage UI settings string:"),
    ("importError", "Invalid settings format. Could not import."),
    ("resetToDefaults", "Reset to Defaults"),
    ("language", "Language"),
    ("primary", "Primary"),
    ("secondary", "Secondary"),
    ("presetMirageDefault", "Mirage Default"),
    ("presetPureGlass", "Pure Glass"),
    ("presetMinimalistSolid", "Minimalist Solid"),
    ("day", "Day"),
    ("night", "Night"),
    ("saveError", "Could not save settings to Home Assistant."),
    ("uploadError", "Could not upload the background image."),
    ("loadError", "Could not load settings; using defaults."),
];

pub(super) const DE: &[(&str, &str)] = &[
    ("configTitle", "Mirage UI Konfiguration"),
    ("livePreview", "Mirage Live-Vorschau"),
    ("previewCardTitle", "Mirage Card Vorschau"),
    ("previewCardContent", "Dies ist eine Vorschau Ihrer aktuellen Einstellungen."),
    ("example", "Beispiel"),
    ("presets", "Presets"),
    ("loadPreset", "Preset laden"),
    ("defaultPresets", "Standard-Presets"),
    ("myPresets", "Meine Presets"),
    ("undo", "Rückgängig"),
    ("deletePreset", "\"{presetName}\" löschen"),
    ("saveCurrentStyle", "Aktuellen Stil speichern"),
    ("newPresetPlaceholder", "Name für neues Preset..."),
    ("save", "Speichern"),
    ("theme", "Theme"),
    ("mode", "Modus"),
    ("light", "Hell"),
    ("dark", "Dunkel"),
    ("cardStyle", "Kartenstil"),
    ("glass", "Glas"),
    ("solid", "Solid"),
    ("paper", "Papier"),
    ("floating", "Schwebend"),
    ("blurIntensity", "Unschärfe"),
    ("transparency", "Transparenz"),
    ("grayness", "Graustufe"),
    ("backgroundColor", "Hintergrundfarbe"),
    ("opacity", "Deckkraft"),
    ("appearance", "Erscheinungsbild"),
    ("borderRadius", "Randradius"),
    ("borderWidth", "Randbreite"),
    ("separatorWidth", "Trennerbreite"),
    ("cardTextColor", "Karten-Textfarbe"),
    ("auto", "Auto"),
    ("fontStyle", "Schriftart"),
    ("system", "System"),
    ("serif", "Serif"),
    ("mono", "Mono"),
    ("animations", "Animationen"),
    ("colors", "Farben"),
    ("accentColor", "Akzentfarbe"),
    ("temperature", "Temperatur"),
    ("weather", "Wetter"),
    ("humidity", "Feuchtigkeit"),
    ("door", "Tür"),
    ("backgrounds", "Hintergründe"),
    ("darkThemeBgImage", "Hintergrundbild (Dunkel)"),
    ("darkThemeBgColor", "Hintergrundfarbe (Dunkel)"),
    ("lightThemeBgImage", "Hintergrundbild (Hell)"),
    ("lightThemeBgColor", "Hintergrundfarbe (Hell)"),
    ("uploadImage", "Bild hochladen"),
    ("localImageSelected", "Lokales Bild ausgewählt"),
    ("change", "Ändern"),
    ("clear", "Löschen"),
    ("bgNote", "Hinweis: Ein hochgeladenes Bild hat immer Vorrang vor einer Hintergrundfarbe."),
    ("advanced", "Erweitert"),
    ("export", "Exportieren"),
    ("import", "Importieren"),
    ("settingsCopied", "Einstellungen in die Zwischenablage kopiert!"),
    ("pasteSettingsPrompt", "Fügen Sie Ihre Mirage UI Einstellungs-Zeichenfolge ein:"),
    ("importError", "Ungültiges Einstellungsformat. Import fehlgeschlagen."),
    ("resetToDefaults", "Auf Standard zurücksetzen"),
    ("language", "Sprache"),
    ("primary", "Primär"),
    ("secondary", "Sekundär"),
    ("presetMirageDefault", "Mirage Standard"),
    ("presetPureGlass", "Reines Glas"),
    ("presetMinimalistSolid", "Minimalistisch Solid"),
    ("day", "Tag"),
    ("night", "Nacht"),
    ("saveError", "Einstellungen konnten nicht in Home Assistant gespeichert werden."),
    ("uploadError", "Das Hintergrundbild konnte nicht hochgeladen werden."),
    ("loadError", "Einstellungen konnten nicht geladen werden; Standardwerte werden verwendet."),
];

pub(super) const FR: &[(&str, &str)] = &[
    ("configTitle", "Configuration de l'interface Mirage"),
    ("livePreview", "Aperçu en direct de Mirage"),
    ("previewCardTitle", "Aperçu de la carte Mirage"),
    ("previewCardContent", "Ceci est un aperçu de vos paramètres actuels."),
    ("example", "Exemple"),
    ("presets", "Préréglages"),
    ("loadPreset", "Charger un préréglage"),
    ("defaultPresets", "Préréglages par défaut"),
    ("myPresets", "Mes préréglages"),
    ("undo", "Annuler"),
    ("deletePreset", "Supprimer \"{presetName}\""),
    ("saveCurrentStyle", "Enregistrer le style actuel"),
    ("newPresetPlaceholder", "Nom du nouveau préréglage..."),
    ("save", "Enregistrer"),
    ("theme", "Thème"),
    ("mode", "Mode"),
    ("light", "Clair"),
    ("dark", "Sombre"),
    ("cardStyle", "Style de carte"),
    ("glass", "Verre"),
    ("solid", "Solide"),
    ("paper", "Papier"),
    ("floating", "Flottant"),
    ("blurIntensity", "Intensité du flou"),
    ("transparency", "Transparence"),
    ("grayness", "Niveau de gris"),
    ("backgroundColor", "Couleur de fond"),
    ("opacity", "Opacité"),
    ("appearance", "Apparence"),
    ("borderRadius", "Rayon de la bordure"),
    ("borderWidth", "Largeur de la bordure"),
    ("separatorWidth", "Largeur du séparateur"),
    ("cardTextColor", "Couleur du texte de la carte"),
    ("auto", "Auto"),
    ("fontStyle", "Style de police"),
    ("system", "Système"),
    ("serif", "Serif"),
    ("mono", "Mono"),
    ("animations", "Animations"),
    ("colors", "Couleurs"),
    ("accentColor", "Couleur d'accentuation"),
    ("temperature", "Température"),
    ("weather", "Météo"),
    ("humidity", "Humidité"),
    ("door", "Porte"),
    ("backgrounds", "Arrière-plans"),
    ("darkThemeBgImage", "Image de fond (Thème sombre)"),
    ("darkThemeBgColor", "Couleur de fond (Thème sombre)"),
    ("lightThemeBgImage", "Image de fond (Thème clair)"),
    ("lightThemeBgColor", "Couleur de fond (Thème clair)"),
    ("uploadImage", "Télécharger une image"),
    ("localImageSelected", "Image locale sélectionnée"),
    ("change", "Changer"),
    ("clear", "Effacer"),
    ("bgNote", "Remarque : Une image téléchargée prévaudra toujours sur une couleur de fond."),
    ("advanced", "Avancé"),
    ("export", "Exporter"),
    ("import", "Importer"),
    ("settingsCopied", "Paramètres copiés dans le presse-papiers !"),
    ("pasteSettingsPrompt", "Collez votre chaîne de paramètres de l'interface Mirage :"),
    ("importError", "Format de paramètres non valide. L'importation a échoué."),
    ("resetToDefaults", "Réinitialiser les paramètres par défaut"),
    ("language", "Langue"),
    ("primary", "Primaire"),
    ("secondary", "Secondaire"),
    ("presetMirageDefault", "Mirage par défaut"),
    ("presetPureGlass", "Verre pur"),
    ("presetMinimalistSolid", "Solide minimaliste"),
    ("day", "Jour"),
    ("night", "Nuit"),
    ("saveError", "Impossible d'enregistrer les paramètres dans Home Assistant."),
    ("uploadError", "Impossible de télécharger l'image de fond."),
    ("loadError", "Impossible de charger les paramètres ; valeurs par défaut utilisées."),
];
