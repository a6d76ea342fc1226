//! Conversation languages and their localized chat strings.

/// Languages the assistant greets and prompts in. The model itself answers in
/// whatever language the user writes; this only drives the static UI strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Hindi,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
    Bengali,
    Marathi,
    Gujarati,
    Punjabi,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Tamil => "ta",
            Language::Telugu => "te",
            Language::Kannada => "kn",
            Language::Malayalam => "ml",
            Language::Bengali => "bn",
            Language::Marathi => "mr",
            Language::Gujarati => "gu",
            Language::Punjabi => "pa",
        }
    }

    /// Unknown or stale codes fall back to English at the call sites.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "en" => Some(Language::English),
            "hi" => Some(Language::Hindi),
            "ta" => Some(Language::Tamil),
            "te" => Some(Language::Telugu),
            "kn" => Some(Language::Kannada),
            "ml" => Some(Language::Malayalam),
            "bn" => Some(Language::Bengali),
            "mr" => Some(Language::Marathi),
            "gu" => Some(Language::Gujarati),
            "pa" => Some(Language::Punjabi),
            _ => None,
        }
    }

    pub fn all() -> &'static [Language] {
        &[
            Language::English,
            Language::Hindi,
            Language::Tamil,
            Language::Telugu,
            Language::Kannada,
            Language::Malayalam,
            Language::Bengali,
            Language::Marathi,
            Language::Gujarati,
            Language::Punjabi,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Tamil => "Tamil",
            Language::Telugu => "Telugu",
            Language::Kannada => "Kannada",
            Language::Malayalam => "Malayalam",
            Language::Bengali => "Bengali",
            Language::Marathi => "Marathi",
            Language::Gujarati => "Gujarati",
            Language::Punjabi => "Punjabi",
        }
    }

    pub fn native_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "हिन्दी",
            Language::Tamil => "தமிழ்",
            Language::Telugu => "తెలుగు",
            Language::Kannada => "ಕನ್ನಡ",
            Language::Malayalam => "മലയാളം",
            Language::Bengali => "বাংলা",
            Language::Marathi => "मराठी",
            Language::Gujarati => "ગુજરાતી",
            Language::Punjabi => "ਪੰਜਾਬੀ",
        }
    }

    /// Greeting shown as the first assistant message of a fresh conversation.
    pub fn greeting(&self) -> &'static str {
        match self {
            Language::English => "Hello! I'm Springwell, your AI assistant for groundwater insights. How can I help you today? Try asking me to create a chart or show data on the map.",
            Language::Hindi => "नमस्ते! मैं स्प्रिंगवेल हूँ, भूजल संबंधी जानकारी के लिए आपका AI सहायक। मैं आज आपकी कैसे मदद कर सकता हूँ?",
            Language::Tamil => "வணக்கம்! நான் ஸ்பிரிங்வெல், உங்கள் நிலத்தடி நீர் நுண்ணறிவுக்கான AI உதவியாளர். இன்று நான் உங்களுக்கு எப்படி உதவ முடியும்?",
            Language::Telugu => "నమస్కారం! నేను స్ప్రింగ్‌వెల్, భూగర్భజల అంతర్దృష్టుల కోసం మీ AI అసిస్టెంట్. ఈ రోజు నేను మీకు ఎలా సహాయపడగలను?",
            Language::Kannada => "ನಮಸ್ಕಾರ! ನಾನು ಸ್ಪ್ರಿಂಗ್‌ವೆಲ್, ಅಂತರ್ಜಲ ಒಳನೋಟಗಳಿಗಾಗಿ ನಿಮ್ಮ AI ಸಹಾಯಕ. ಇಂದು ನಾನು ನಿಮಗೆ ಹೇಗೆ ಸಹಾಯ ಮಾಡಬಹುದು?",
            Language::Malayalam => "നമസ്കാരം! ഞാൻ സ്പ്രിംഗ്വെൽ, ഭൂഗർഭജല ഉൾക്കാഴ്ചകൾക്കായുള്ള നിങ്ങളുടെ AI അസിസ്റ്റന്റ്. ഇന്ന് ഞാൻ നിങ്ങളെ എങ്ങനെ സഹായിക്കും?",
            Language::Bengali => "নমস্কার! আমি স্প্রিংওয়েল, ভূগর্ভস্থ জল সম্পর্কিত তথ্যের জন্য আপনার এআই সহকারী। আমি আজ আপনাকে কিভাবে সাহায্য করতে পারি?",
            Language::Marathi => "नमस्कार! मी स्प्रिंगवेल, भूजल अंतर्दृष्टीसाठी तुमचा AI सहाय्यक आहे. मी आज तुम्हाला कशी मदत करू शकेन?",
            Language::Gujarati => "નમસ્તે! હું સ્પ્રિંગવેલ છું, ભૂગર્ભજળની આંતરદૃષ્ટિ માટે તમારો AI સહાયક. આજે હું તમને કેવી રીતે મદદ કરી શકું?",
            Language::Punjabi => "ਸਤ ਸ੍ਰੀ ਅਕਾਲ! ਮੈਂ ਸਪਰਿੰਗਵੈਲ ਹਾਂ, ਧਰਤੀ ਹੇਠਲੇ ਪਾਣੀ ਦੀ ਜਾਣਕਾਰੀ ਲਈ ਤੁਹਾਡਾ AI ਸਹਾਇਕ। ਮੈਂ ਅੱਜ ਤੁਹਾਡੀ ਕਿਵੇਂ ਮਦਦ ਕਰ ਸਕਦਾ ਹਾਂ?",
        }
    }

    /// Placeholder shown in the empty input box.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Language::English => "Ask me to create a chart or show data on the map...",
            Language::Hindi => "भूजल डेटा के बारे में पूछें...",
            Language::Tamil => "நிலத்தடி நீர் தரவைப் பற்றி கேளுங்கள்...",
            Language::Telugu => "భూగర్భజల డేటా గురించి అడగండి...",
            Language::Kannada => "ಅಂತರ್ಜಲ ಡೇಟಾ ಬಗ್ಗೆ ಕೇಳಿ...",
            Language::Malayalam => "ഭൂഗർഭജല ഡാറ്റയെക്കുറിച്ച് ചോദിക്കുക...",
            Language::Bengali => "ভূগর্ভস্থ জলের ডেটা সম্পর্কে জিজ্ঞাসা করুন...",
            Language::Marathi => "भूजल डेटाबद्दल विचारा...",
            Language::Gujarati => "ભૂગર્ભજળ ડેટા વિશે પૂછો...",
            Language::Punjabi => "ਧਰਤੀ ਹੇਠਲੇ ਪਾਣੀ ਦੇ ਡੇਟਾ ਬਾਰੇ ਪੁੱਛੋ...",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip() {
        for lang in Language::all() {
            assert_eq!(Language::from_code(lang.code()), Some(*lang));
        }
    }

    #[test]
    fn test_unknown_code_is_none() {
        assert_eq!(Language::from_code("fr"), None);
        assert_eq!(Language::from_code(""), None);
    }

    #[test]
    fn test_every_language_has_strings() {
        for lang in Language::all() {
            assert!(!lang.greeting().is_empty());
            assert!(!lang.placeholder().is_empty());
        }
    }
}
