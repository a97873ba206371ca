//! Labels for the enumerated EXIF camera-setting codes.

pub fn flash_label(code: i64) -> String {
    let label = match code {
        0 => "No flash",
        1 => "Flash fired",
        5 => "Strobe return light not detected",
        7 => "Strobe return light detected",
        9 => "Flash fired, compulsory flash mode",
        13 => "Flash fired, compulsory flash mode, return light not detected",
        15 => "Flash fired, compulsory flash mode, return light detected",
        16 => "Flash did not fire, compulsory flash mode",
        24 => "Flash did not fire, auto mode",
        25 => "Flash fired, auto mode",
        29 => "Flash fired, auto mode, return light not detected",
        31 => "Flash fired, auto mode, return light detected",
        32 => "No flash function",
        65 => "Flash fired, red-eye reduction mode",
        69 => "Flash fired, red-eye reduction mode, return light not detected",
        71 => "Flash fired, red-eye reduction mode, return light detected",
        73 => "Flash fired, compulsory flash mode, red-eye reduction mode",
        77 => "Flash fired, compulsory flash mode, red-eye reduction mode, return light not detected",
        79 => "Flash fired, compulsory flash mode, red-eye reduction mode, return light detected",
        89 => "Flash fired, auto mode, red-eye reduction mode",
        93 => "Flash fired, auto mode, return light not detected, red-eye reduction mode",
        95 => "Flash fired, auto mode, return light detected, red-eye reduction mode",
        other => return unknown(other),
    };
    label.to_string()
}

pub fn metering_mode_label(code: i64) -> String {
    let label = match code {
        0 => "Unknown",
        1 => "Average",
        2 => "Center-weighted average",
        3 => "Spot",
        4 => "Multi-spot",
        5 => "Pattern",
        6 => "Partial",
        255 => "Other",
        other => return unknown(other),
    };
    label.to_string()
}

/// Covers both the EXIF `WhiteBalance` tag (0 and 1) and the wider preset codes
/// some vendors write into it.
pub fn white_balance_label(code: i64) -> String {
    let label = match code {
        0 => "Auto",
        1 | 9 | 17 => "Manual",
        2 => "Auto (warm light)",
        3 => "Auto (cool light)",
        4 => "Auto (daylight)",
        5 => "Auto (cloudy)",
        6 => "Auto (tungsten)",
        7 => "Auto (fluorescent)",
        8 => "Auto (flash)",
        10 => "Cloudy",
        11 => "Shade",
        18 => "Daylight fluorescent",
        19 => "Day white fluorescent",
        20 => "Cool white fluorescent",
        21 => "White fluorescent",
        22 => "Warm white fluorescent",
        23 => "Standard light A",
        24 => "Standard light B",
        25 => "Standard light C",
        26 => "D55",
        27 => "D65",
        28 => "D75",
        29 => "D50",
        30 => "ISO studio tungsten",
        other => return unknown(other),
    };
    label.to_string()
}

pub fn exposure_program_label(code: i64) -> String {
    let label = match code {
        0 => "Not defined",
        1 => "Manual",
        2 => "Normal program",
        3 => "Aperture priority",
        4 => "Shutter priority",
        5 => "Creative program",
        6 => "Action program",
        7 => "Portrait mode",
        8 => "Landscape mode",
        other => return unknown(other),
    };
    label.to_string()
}

fn unknown(code: i64) -> String {
    format!("Unknown ({code})")
}
