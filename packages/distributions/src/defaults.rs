//! Built-in national distribution tables.
//!
//! Observed counts by offender age, offender sex, incident location, weapon,
//! and linked offense type. Entry order is the order the tables are written
//! and fanned out in.

/// Offender age bracket counts.
pub const OFFENDER_AGE: &[(&str, u64)] = &[
    ("20-29", 804_232),
    ("30-39", 780_177),
    ("40-49", 433_988),
    ("10-19", 379_813),
    ("Unknown", 329_673),
    ("50-59", 237_879),
    ("60-69", 101_324),
    ("70-79", 23_753),
    ("0-9", 5_057),
    ("80-89", 5_002),
    ("90-Older", 2_193),
];

/// Offender sex counts.
pub const OFFENDER_SEX: &[(&str, u64)] = &[
    ("Male", 2_265_464),
    ("Female", 696_299),
    ("Unknown", 137_568),
    ("Not Specified", 301_008),
];

/// Incident location counts.
pub const LOCATION: &[(&str, u64)] = &[
    ("Residence/Home", 1_920_229),
    ("Highway/Road/Alley/Street/Sidewalk", 778_700),
    ("Parking/Drop Lot/Garage", 208_198),
    ("Other/Unknown", 104_201),
    ("Hotel/Motel/Etc.", 58_147),
    ("Bar/Nightclub", 51_384),
    ("Convenience Store", 44_552),
    ("Restaurant", 43_244),
    ("Park/Playground", 42_564),
    ("School-Elementary/Secondary", 39_755),
    ("Service/Gas Station", 37_900),
    ("Jail/Prison/Penitentiary/Corrections Facility", 37_571),
    ("Drug Store/Doctor's Office/Hospital", 29_118),
    ("Commercial/Office Building", 25_180),
    ("Field/Woods", 18_333),
    ("Grocery/Supermarket", 17_968),
    ("Department/Discount Store", 16_358),
    ("Specialty Store", 15_675),
    ("Air/Bus/Train Terminal", 13_889),
    ("Government/Public Building", 13_150),
    ("Shelter-Mission/Homeless", 7_752),
    ("School-College/University", 6_634),
    ("Shopping Mall", 6_059),
    ("School/College", 4_838),
    ("Camp/Campground", 4_726),
    ("Liquor Store", 4_683),
    ("Church/Synagogue/Temple/Mosque", 4_588),
    ("Construction Site", 4_279),
    ("Tribal Lands", 3_365),
    ("Lake/Waterway/Beach", 3_364),
    ("Rental Storage Facility", 3_348),
    ("Gambling Facility/Casino/Race Track", 2_788),
    ("Community Center", 2_691),
    ("Arena/Stadium/Fairgrounds/Coliseum", 2_375),
    ("Industrial Site", 2_164),
    ("Daycare Facility", 1_918),
    ("Bank/Savings and Loan", 1_843),
    ("Auto Dealership New/Used", 1_705),
    ("Amusement Park", 1_363),
    ("Abandoned/Condemned Structure", 1_323),
    ("Dock/Wharf/Freight/Modal Terminal", 1_155),
    ("Rest Area", 1_115),
    ("Farm Facility", 747),
    ("ATM Separate from Bank", 274),
    ("Military Installation", 241),
    ("Cyberspace", 0),
    ("Not Specified", 0),
];

/// Weapon involvement counts.
pub const WEAPON: &[(&str, u64)] = &[
    ("Handgun", 727_729),
    ("Personal Weapons", 704_067),
    ("Knife/Cutting Instrument", 575_271),
    ("Firearm", 452_701),
    ("Other", 353_407),
    ("Blunt Object", 346_097),
    ("Motor Vehicle/Vessel", 188_325),
    ("Asphyxiation", 106_723),
    ("None", 91_762),
    ("Unknown", 74_937),
    ("Rifle", 62_245),
    ("Other Firearm", 35_673),
    ("Shotgun", 23_723),
    ("Handgun (Automatic)", 20_102),
    ("Firearm (Automatic)", 10_960),
    ("Fire/Incendiary Device", 8_483),
    ("Drugs/Narcotics/Sleeping Pills", 5_927),
    ("Poison", 4_036),
    ("Rifle (Automatic)", 3_439),
    ("Explosives", 2_198),
    ("Other Firearm (Automatic)", 827),
    ("Shotgun (Automatic)", 319),
];

/// Linked offense type counts.
pub const OFFENSE_LINK: &[(&str, u64)] = &[
    ("Destruction/Damage/Vandalism of Property", 217_365),
    ("Weapon Law Violations", 178_345),
    ("Simple Assault", 111_621),
    ("Drug/Narcotic Violations", 49_326),
    ("Kidnapping/Abduction", 47_586),
    ("Burglary/Breaking & Entering", 39_455),
    ("All Other Larceny", 28_077),
    ("Intimidation", 22_377),
    ("Drug Equipment Violations", 20_798),
    ("Motor Vehicle Theft", 12_542),
    ("Robbery", 11_276),
    ("Murder and Nonnegligent Manslaughter", 9_322),
    ("Stolen Property Offenses", 8_164),
    ("Shoplifting", 8_136),
    ("Theft From Motor Vehicle", 6_488),
    ("Theft From Building", 6_303),
    ("Criminal Sexual Contact", 4_127),
    ("Arson", 3_466),
    ("False Pretenses/Swindle/Confidence Game", 2_472),
    ("Animal Cruelty", 2_140),
    ("Impersonation", 1_399),
    ("Theft of Motor Vehicle Parts or Accessories", 1_084),
    ("Counterfeiting/Forgery", 1_012),
    ("Rape", 860),
    ("Pocket-picking", 729),
    ("Purse-snatching", 661),
    ("Pornography/Obscene Material", 627),
    ("Identity Theft", 594),
    ("Credit Card/Automated Teller Machine Fraud", 570),
    ("Extortion/Blackmail", 436),
    ("Negligent Manslaughter", 415),
    ("Statutory Rape", 356),
    ("Human Trafficking, Commercial Sex Acts", 251),
    ("Sodomy", 203),
    ("Assisting or Promoting Prostitution", 196),
    ("Embezzlement", 174),
    ("Bribery", 167),
    ("Prostitution", 131),
    ("Human Trafficking, Involuntary Servitude", 106),
    ("Sexual Assault With An Object", 101),
    ("Wire Fraud", 64),
    ("Purchasing Prostitution", 58),
    ("Incest", 54),
    ("Hacking/Computer Invasion", 27),
    ("Theft From Coin-Operated Machine or Device", 19),
    ("Flight to Avoid Prosecution", 16),
    ("Operating/Promoting/Assisting Gambling", 14),
    ("Federal Liquor Offenses", 10),
    ("Welfare Fraud", 6),
    ("Betting/Wagering", 5),
    ("Gambling Equipment Violation", 4),
    ("Failure to Register as a Sex Offender", 2),
    ("Smuggling Aliens", 2),
    ("Illegal Entry into the United States", 1),
];
