//! Exact masses for named isotopes.
//!
//! The table is keyed by (atomic number, mass number) and sorted so lookups
//! can binary-search. Isotopes absent from the table are handled by the
//! caller (the default isotope is used instead).
//!
//! Reference: Coursey, Schwab, Tsai, Dragoset, Atomic Weights and Isotopic
//! Compositions (version 4.1), NIST, 2015.

use crate::element::Element;

/// (atomic number, mass number, isotopic mass in amu), sorted by (Z, A).
#[rustfmt::skip]
const ISOTOPE_MASSES: &[(u8, u16, f64)] = &[
    // H
    (1, 1, 1.00782503223), (1, 2, 2.01410177812), (1, 3, 3.0160492779),
    // He
    (2, 3, 3.0160293201), (2, 4, 4.00260325413),
    // Li
    (3, 6, 6.0151228874), (3, 7, 7.0160034366),
    // Be
    (4, 9, 9.012183065),
    // B
    (5, 10, 10.0129369), (5, 11, 11.00930536),
    // C
    (6, 12, 12.0000000), (6, 13, 13.00335483507),
    // N
    (7, 14, 14.00307400443), (7, 15, 15.00010889888),
    // O
    (8, 16, 15.99491461957), (8, 17, 16.99913175650), (8, 18, 17.99915961286),
    // F
    (9, 19, 18.99840316273),
    // Ne
    (10, 20, 19.9924401762), (10, 21, 20.993846685), (10, 22, 21.991385114),
    // Na
    (11, 23, 22.9897692820),
    // Mg
    (12, 24, 23.985041697), (12, 25, 24.985836976), (12, 26, 25.982592968),
    // Al
    (13, 27, 26.98153853),
    // Si
    (14, 28, 27.97692653465), (14, 29, 28.97649466490), (14, 30, 29.973770136),
    // P
    (15, 31, 30.97376199842),
    // S
    (16, 32, 31.9720711744), (16, 33, 32.97145875870), (16, 34, 33.967867004),
    (16, 36, 35.96708071),
    // Cl
    (17, 35, 34.968852682), (17, 37, 36.965902602),
    // Ar
    (18, 36, 35.967545105), (18, 38, 37.96273211), (18, 40, 39.9623831237),
    // K
    (19, 39, 38.9637064864), (19, 40, 39.963998166), (19, 41, 40.9618252579),
    // Ca
    (20, 40, 39.962590863), (20, 42, 41.95861783), (20, 43, 42.95876644),
    (20, 44, 43.95548156), (20, 46, 45.9536890), (20, 48, 47.95252276),
    // Sc
    (21, 45, 44.95590828),
    // Ti
    (22, 46, 45.95262772), (22, 47, 46.95175879), (22, 48, 47.94794198),
    (22, 49, 48.94786568), (22, 50, 49.94478689),
    // V
    (23, 50, 49.94715601), (23, 51, 50.94395704),
    // Cr
    (24, 50, 49.94604183), (24, 52, 51.94050623), (24, 53, 52.94064815),
    (24, 54, 53.93887916),
    // Mn
    (25, 55, 54.93804391),
    // Fe
    (26, 54, 53.93960899), (26, 56, 55.93493633), (26, 57, 56.93539284),
    (26, 58, 57.93327443),
    // Co
    (27, 59, 58.93319429),
    // Ni
    (28, 58, 57.93534241), (28, 60, 59.93078588), (28, 61, 60.93105557),
    (28, 62, 61.92834537), (28, 64, 63.92796682),
    // Cu
    (29, 63, 62.92959772), (29, 65, 64.92778970),
    // Zn
    (30, 64, 63.92914201), (30, 66, 65.92603381), (30, 67, 66.92712775),
    (30, 68, 67.92484455), (30, 70, 69.92532310),
    // Ga
    (31, 69, 68.92558860), (31, 71, 70.92470258),
    // Ge
    (32, 70, 69.92424875), (32, 72, 71.92207583), (32, 73, 72.92345896),
    (32, 74, 73.92117776), (32, 76, 75.92140273),
    // As
    (33, 75, 74.92159457),
    // Se
    (34, 74, 73.92247593), (34, 76, 75.91921378), (34, 77, 76.91991415),
    (34, 78, 77.91730928), (34, 80, 79.91652128), (34, 82, 81.91667033),
    // Br
    (35, 79, 78.91833710), (35, 81, 80.91629056),
    // Kr
    (36, 78, 77.92036494), (36, 80, 79.91637808), (36, 82, 81.91348273),
    (36, 83, 82.91412716), (36, 84, 83.91149773), (36, 86, 85.91061063),
    // Rb
    (37, 85, 84.91178974), (37, 87, 86.90918053),
    // Sr
    (38, 84, 83.91342197), (38, 86, 85.90926073), (38, 87, 86.90887750),
    (38, 88, 87.90561226),
    // Y
    (39, 89, 88.90584830),
    // Zr
    (40, 90, 89.90470166), (40, 91, 90.90564299), (40, 92, 91.90503655),
    (40, 94, 93.90631412), (40, 96, 95.90827760),
    // Nb
    (41, 93, 92.90637806),
    // Mo
    (42, 92, 91.90680796), (42, 94, 93.90508490), (42, 95, 94.90583877),
    (42, 96, 95.90467612), (42, 97, 96.90601812), (42, 98, 97.90540482),
    (42, 100, 99.90747477),
    // Tc
    (43, 97, 96.90636526), (43, 98, 97.90721599), (43, 99, 98.90625475),
    // Ru
    (44, 96, 95.90759025), (44, 98, 97.90529954), (44, 99, 98.90593046),
    (44, 100, 99.90421628), (44, 101, 100.90557426), (44, 102, 101.90434930),
    (44, 104, 103.90543481),
    // Rh
    (45, 103, 102.90550393),
    // Pd
    (46, 102, 101.90563239), (46, 104, 103.90403235), (46, 105, 104.90508492),
    (46, 106, 105.90348764), (46, 108, 107.90389433), (46, 110, 109.90517220),
    // Ag
    (47, 107, 106.90509474), (47, 109, 108.90475628),
    // Cd
    (48, 106, 105.90645941), (48, 108, 107.90418157), (48, 110, 109.90300661),
    (48, 111, 110.90418287), (48, 112, 111.90276287), (48, 113, 112.90440813),
    (48, 114, 113.90336509), (48, 116, 115.90476315),
    // In
    (49, 113, 112.90406184), (49, 115, 114.90387877),
    // Sn
    (50, 112, 111.90482387), (50, 114, 113.90278099), (50, 115, 114.90334469),
    (50, 116, 115.90174280), (50, 117, 116.90295398), (50, 118, 117.90160657),
    (50, 119, 118.90331117), (50, 120, 119.90220163), (50, 122, 121.90343655),
    // Sb
    (51, 121, 120.90381639), (51, 123, 122.90421786),
    // Te
    (52, 120, 119.90402350), (52, 122, 121.90304224), (52, 123, 122.90427192),
    (52, 124, 123.90281909), (52, 125, 124.90442474), (52, 126, 125.90331468),
    (52, 128, 127.90446128), (52, 130, 129.90622275),
    // I
    (53, 127, 126.90447280),
    // Xe
    (54, 124, 123.90589114), (54, 126, 125.90408660), (54, 128, 127.90353450),
    (54, 129, 128.90478086), (54, 130, 129.90350840), (54, 131, 130.90508406),
    (54, 132, 131.90415509), (54, 134, 133.90539466), (54, 136, 135.90721448),
    // Cs
    (55, 133, 132.90545196),
    // Ba
    (56, 130, 129.90632105), (56, 132, 131.90504130), (56, 134, 133.90449204),
    (56, 135, 134.90568838), (56, 136, 135.90457573), (56, 137, 136.90582714),
    (56, 138, 137.90524700),
    // La
    (57, 138, 137.90712300), (57, 139, 138.90635330),
    // Ce
    (58, 136, 135.90712921), (58, 138, 137.90599591), (58, 140, 139.90543870),
    (58, 142, 141.90924730),
    // Pr
    (59, 141, 140.90765931),
    // Nd
    (60, 142, 141.90772130), (60, 143, 142.90981720), (60, 144, 143.91008720),
    (60, 145, 144.91257930), (60, 146, 145.91311920), (60, 148, 147.91689770),
    (60, 150, 149.92089220),
    // Pm
    (61, 145, 144.91275590),
    // Sm
    (62, 144, 143.91199720), (62, 147, 146.91489230), (62, 148, 147.91482290),
    (62, 149, 148.91718740), (62, 150, 149.91727340), (62, 152, 151.91973240),
    (62, 154, 153.92221640),
    // Eu
    (63, 151, 150.91985630), (63, 153, 152.92123110),
    // Gd
    (64, 152, 151.91979540), (64, 154, 153.92086700), (64, 155, 154.92262120),
    (64, 156, 155.92212780), (64, 157, 156.92396850), (64, 158, 157.92410810),
    (64, 160, 159.92705810),
    // Tb
    (65, 159, 158.92534640),
    // Dy
    (66, 156, 155.92428310), (66, 158, 157.92440990), (66, 160, 159.92519530),
    (66, 161, 160.92693190), (66, 162, 161.92680180), (66, 163, 162.92873390),
    (66, 164, 163.92917480),
    // Ho
    (67, 165, 164.93032090),
    // Er
    (68, 162, 161.92877900), (68, 164, 163.92920580), (68, 166, 165.93029310),
    (68, 167, 166.93204750), (68, 168, 167.93237580), (68, 170, 169.93546690),
    // Tm
    (69, 169, 168.93421790),
    // Yb
    (70, 168, 167.93389340), (70, 170, 169.93476630), (70, 171, 170.93632540),
    (70, 172, 171.93638590), (70, 173, 172.93821580), (70, 174, 173.93886310),
    (70, 176, 175.94256830),
    // Lu
    (71, 175, 174.94077180), (71, 176, 175.94268970),
    // Hf
    (72, 174, 173.94004040), (72, 176, 175.94140760), (72, 177, 176.94322760),
    (72, 178, 177.94370520), (72, 179, 178.94581810), (72, 180, 179.94655090),
    // Ta
    (73, 180, 179.94746340), (73, 181, 180.94799580),
    // W
    (74, 180, 179.94670790), (74, 182, 181.94820394), (74, 183, 182.95022275),
    (74, 184, 183.95093092), (74, 186, 185.95436093),
    // Re
    (75, 185, 184.95295980), (75, 187, 186.95575205),
    // Os
    (76, 184, 183.95248990), (76, 186, 185.95383710), (76, 187, 186.95574840),
    (76, 188, 187.95583810), (76, 189, 188.95814740), (76, 190, 189.95844880),
    (76, 192, 191.96147970),
    // Ir
    (77, 191, 190.96059350), (77, 193, 192.96292640),
    // Pt
    (78, 190, 189.95993000), (78, 192, 191.96103400), (78, 194, 193.96267690),
    (78, 195, 194.96479110), (78, 196, 195.96495209), (78, 198, 197.96789620),
    // Au
    (79, 197, 196.96656879),
    // Hg
    (80, 196, 195.96583100), (80, 198, 197.96676860), (80, 199, 198.96828064),
    (80, 200, 199.96832659), (80, 201, 200.97030284), (80, 202, 201.97064340),
    (80, 204, 203.97349398),
    // Tl
    (81, 203, 202.97234422), (81, 205, 204.97442850),
    // Pb
    (82, 204, 203.97304100), (82, 206, 205.97444719), (82, 207, 206.97589731),
    (82, 208, 207.97665210),
    // Bi
    (83, 209, 208.98039860),
    // Po
    (84, 209, 208.98243040),
    // At
    (85, 210, 209.98714800),
    // Rn
    (86, 211, 210.99058700),
    // Fr
    (87, 223, 223.01973600),
    // Ra
    (88, 223, 223.01850300), (88, 224, 224.02021100), (88, 226, 226.02540980),
    (88, 228, 228.03107000),
    // Ac
    (89, 227, 227.02774700),
    // Th
    (90, 230, 230.03313400), (90, 232, 232.03805500),
    // Pa
    (91, 231, 231.03588200),
    // U
    (92, 233, 233.03963400), (92, 234, 234.04095200), (92, 235, 235.04392800),
    (92, 236, 236.04556300), (92, 238, 238.05078600),
    // Np
    (93, 237, 237.04817300),
    // Pu
    (94, 238, 238.04955700), (94, 239, 239.05216300), (94, 240, 240.05381400),
    (94, 241, 241.05685100), (94, 242, 242.05874400),
    // Am
    (95, 241, 241.05682900), (95, 243, 243.06138100),
    // Cm
    (96, 243, 243.06138100), (96, 244, 244.06275300), (96, 245, 245.06548600),
    (96, 246, 246.06721800), (96, 247, 247.07035300), (96, 248, 248.07234900),
    // Bk
    (97, 247, 247.07030700), (97, 249, 249.07498000),
    // Cf
    (98, 249, 249.07485000), (98, 250, 250.07640700), (98, 251, 251.07958700),
    (98, 252, 252.08162900),
    // Es
    (99, 252, 252.08298000),
    // Fm
    (100, 257, 257.09510500),
    // Md
    (101, 258, 258.09843100), (101, 260, 260.10365000),
    // No
    (102, 259, 259.10103000),
    // Lr
    (103, 262, 262.10961000),
    // Rf-Og
    (104, 267, 267.12179000), (105, 268, 268.12567000), (106, 271, 271.13393000),
    (107, 272, 272.13826000), (108, 270, 270.13429000), (109, 276, 276.15159000),
    (110, 281, 281.16451000), (111, 280, 280.16514000), (112, 285, 285.17712000),
    (113, 284, 284.17873000), (114, 289, 289.19042000), (115, 288, 288.19274000),
    (116, 293, 293.20449000), (117, 292, 292.20746000), (118, 294, 294.21392000),
];

/// Look up the exact mass of a named isotope in amu.
///
/// Returns `None` when the isotope is not tabulated; callers fall back to the
/// element's default isotope or to the bare mass number.
pub fn isotope_mass(element: Element, mass_number: i32) -> Option<f64> {
    let mass_number = u16::try_from(mass_number).ok()?;
    let key = (element.atomic_number(), mass_number);
    ISOTOPE_MASSES
        .binary_search_by(|&(z, a, _)| (z, a).cmp(&key))
        .ok()
        .map(|idx| ISOTOPE_MASSES[idx].2)
}
