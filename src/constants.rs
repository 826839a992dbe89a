//! Application constants for area bifurcation
//!
//! Keyword families, area-unit spellings, classification needles, column
//! aliases and output naming used throughout the crate.

// =============================================================================
// Area Extraction
// =============================================================================

/// Numeral class accepted in descriptions (ASCII and Devanagari digits)
pub const DIGIT_CLASS: &str = "[0-9०-९]";

/// Construction-type label that forces contextual parsing
pub const MIXED_USE_MARKER: &str = "मिश्र";

/// Characters inspected before each area token when in contextual mode
pub const DEFAULT_CONTEXT_WINDOW_CHARS: usize = 60;

/// Spelling variants of the native-script "square foot" unit, in match
/// precedence order. Alternation is leftmost-first, so earlier variants win
/// when several could match at the same position.
pub const AREA_UNIT_VARIANTS: &[&str] = &[
    r"चौ\.?\s*फु\.?",
    r"चौ\s*फु",
    r"चौ\.?\s*फू\.?",
    r"चौ\s*फू",
    r"चौ\.?\s*फूट",
    r"चौफुट",
    r"चौ\s*फुट",
    r"चौ\.?\s*फुटात",
    r"चौ\s*फुटात",
];

/// Unit variants stripped together with a preceding `= <number>` fragment
pub const EQUALS_FRAGMENT_UNITS: &[&str] = &[
    r"चौ\.?\s*फु\.?",
    r"चौ\.?\s*फूट",
    r"चौ\s*फु",
    r"चौ\s*फूट",
];

/// Keyword families inspected in the context window preceding an area token
pub mod context_keywords {
    /// Parking; matched case-insensitively
    pub const PARKING: &str = r"पार्किंग|parking";

    /// RCC / residential
    pub const RCC: &str = r"आर\s*\.?\s*सी\s*\.?\s*सी|rcc|निवासी";

    /// Temporary sheet-metal sheds
    pub const TEMPORARY_SHED: &str = r"पत्रा|पत्रा\s*शेड|सिमेंट\s*पत्रा";

    /// Plain construction (kutcha/pucca, simple sheds)
    pub const CONSTRUCTION: &str = r"कच्ची\s*पक्की|साधे\s*शेड";

    /// Open land
    pub const OPEN_SPACE: &str = r"मोकळी\s*जागा|ओपन\s*स्पेस";
}

/// Canonical-key substrings for direct classification of construction types
pub mod classification_needles {
    pub const RCC: &[&str] = &[
        "आरसीसीकिंवालोडबेअरिंग",
        "आरसीसीशेडकिंवाँऑफीस",
        "आरसीसीकिंवालोडबेअरिंगफ्लटसिस्टिमइमारतवचाळ",
        "rcc",
    ];

    pub const CONSTRUCTION: &[&str] = &[
        "कच्चीपक्कीवीटमातीचीछतपत्र्याचेवगवताचेधाब्याचे",
        "साधेशेडकिंवाँऑफीस",
    ];

    pub const TEMPORARY_SHED: &[&str] = &["पत्र्याचीटेम्पररीशेड्स"];

    pub const PARKING: &[&str] = &["पार्किंगएरीया"];

    pub const OPEN_SPACE: &[&str] = &["मोकळ्याजमिन"];
}

// =============================================================================
// Floor Allocation
// =============================================================================

/// Use types whose floors count against the property area cap
pub const RESIDENTIAL_USE_TYPES: &[&str] = &["R", "WR", "SR", "PG", "HO", "ICR"];

/// Construction year stamped on every excess row
pub const EXCESS_CONSTRUCTION_YEAR: i64 = 2025;

/// Logical order assigned to basement floors
pub const BASEMENT_ORDER: i64 = -1;

/// Logical order assigned to the ground floor
pub const GROUND_ORDER: i64 = 0;

/// Logical order assigned to terrace floors
pub const TERRACE_ORDER: i64 = 100;

// =============================================================================
// Progress Reporting
// =============================================================================

pub const RESIDENTIAL_PROGRESS_INTERVAL: usize = 2000;

pub const PROPERTY_PROGRESS_INTERVAL: usize = 100;

// =============================================================================
// Column Names
// =============================================================================

/// Accepted header spellings, matched ignoring case and spaces
pub mod column_aliases {
    pub const DESCRIPTION: &[&str] = &["description"];
    pub const DECLARED_TOTAL: &[&str] = &["totalarea", "total area"];
    pub const CONSTRUCTION_TYPE: &[&str] = &["finalconstructiontype", "constructiontype"];

    pub const PROPERTY_CODE: &[&str] = &["PropertyCode"];
    pub const AREA_CAP: &[&str] = &["Area_R", "AreaR", "TotalArea"];

    pub const FLOOR_PROPERTY_CODE: &[&str] = &["PropertyCode", "propertycode"];
    pub const FLOOR_ID: &[&str] = &["FloorID", "Floor", "Floor Id"];
    pub const BUILTUP_AREA: &[&str] = &["BuiltupAreaSqFeet", "BuiltUpArea", "BuiltupAreaSqft"];
    pub const TYPE_OF_USE: &[&str] = &["TypeOFUse", "TypeOfUse"];
    pub const CONSTRUCTION_YEAR: &[&str] = &["ConstructionYear", "Year"];
    pub const CARPET_AREA: &[&str] = &["CarpetAreaSqFeet", "CarpetArea"];
}

/// Column names written to output tables
pub mod output_columns {
    pub const RAW_AREA_TEXT: &str = "Raw_Area_Text";
    pub const TOTAL_AREA: &str = "Area_R";
    pub const RCC: &str = "RCC";
    pub const PARKING: &str = "PR";
    pub const CONSTRUCTION: &str = "C";
    pub const TEMPORARY_SHED: &str = "E";
    pub const OPEN: &str = "OP";

    pub const PROPERTY_CODE: &str = "PropertyCode";
    pub const FLOOR_ID: &str = "FloorID";
    pub const BUILTUP_AREA: &str = "BuiltupAreaSqFeet";
    pub const CARPET_AREA: &str = "CarpetAreaSqFeet";
    pub const TYPE_OF_USE: &str = "TypeOFUse";
    pub const CONSTRUCTION_YEAR: &str = "ConstructionYear";
    pub const SPLIT_ROW: &str = "SplitRow";
    pub const STATUS: &str = "Status";
}

// =============================================================================
// Output Files
// =============================================================================

pub const RESIDENTIAL_OUTPUT_PREFIX: &str = "Residential_bifurcation";

pub const SPLIT_OUTPUT_PREFIX: &str = "Rvadiv";

pub const UNMATCHED_TYPES_FILE_NAME: &str = "unmatched_construction_types.txt";

pub const SPLIT_SHEET_NAME: &str = "Combined";

/// Timestamp embedded in output file names
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Fill for rows tagged "Balanced Part" or "Overflow Split"
pub const BALANCED_FILL_RGB: u32 = 0xFFFF99;

/// Fill for remaining rows with status "Excess"
pub const EXCESS_FILL_RGB: u32 = 0xFF9999;
