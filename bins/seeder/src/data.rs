//! Starter catalog.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// `(code, type, height m, capacity daN, unit price)`
pub const POLES: &[(&str, &str, Decimal, i32, Decimal)] = &[
    ("DT-11-1000", "Duplo T", dec!(11), 1000, dec!(3200.00)),
    ("DT-11-300", "Duplo T", dec!(11), 300, dec!(1700.00)),
    ("DT-12-1000", "Duplo T", dec!(12), 1000, dec!(3800.00)),
    ("DT-12-600", "Duplo T", dec!(12), 600, dec!(2700.00)),
    ("DT-09-600", "Duplo T", dec!(9), 600, dec!(1800.00)),
    ("DT-09-300", "Duplo T", dec!(9), 300, dec!(1300.00)),
    ("CIRC-11-600", "Concreto", dec!(11), 600, dec!(3100.00)),
    ("CIRC-11-1000", "Concreto", dec!(11), 1000, dec!(3200.00)),
    ("CIRC-11-300", "Concreto", dec!(11), 300, dec!(1700.00)),
    ("CIRC-12-1000", "Concreto", dec!(12), 1000, dec!(3800.00)),
    ("CIRC-12-600", "Concreto", dec!(12), 600, dec!(2700.00)),
    ("CIRC-09-600", "Concreto", dec!(9), 600, dec!(1800.00)),
    ("CIRC-09-300", "Concreto", dec!(9), 300, dec!(1300.00)),
];

/// `(code, description, quantity, unit price)`; every material is sold per piece.
pub type MaterialRow = (&'static str, &'static str, Decimal, Decimal);

/// A structure and its bill of materials.
pub struct StructureSeed {
    pub code: &'static str,
    pub description: &'static str,
    pub voltage_class: &'static str,
    pub materials: &'static [MaterialRow],
}

pub const MEDIUM_VOLTAGE_STRUCTURES: &[StructureSeed] = &[
    StructureSeed {
        code: "CE1",
        description: "Estrutura CE1 - Rede Compacta 1 Fase",
        voltage_class: "13.8kV",
        materials: &[
            ("PAR-CAB-M16-250", "Parafuso cab. quadrada M-16 250mm", dec!(2), dec!(20.16)),
            ("BRACO-L-354", "Braço suporte tipo L", dec!(1), dec!(62.12)),
            ("ARRUELA-QUAD", "Arruela quadrada aço 38x3 ØF 18mm", dec!(1), dec!(40.50)),
            ("ESTRIBO-SUP-L", "Estribo para suporte L", dec!(1), dec!(11.14)),
            ("ESPAC-LOSANG", "Espaçador losangular com garra", dec!(1), dec!(27.95)),
            ("CINTA-190", "Cinta circular 190mm", dec!(1), dec!(7.50)),
        ],
    },
    StructureSeed {
        code: "CE2",
        description: "Estrutura CE2 - Rede Compacta 3 Fases",
        voltage_class: "13.8kV",
        materials: &[
            ("ALCA-PREFORM", "Alça pré-formada estai", dec!(2), dec!(27.95)),
            ("ANEL-AMAR", "Anel de amarração elastomérico para isolador", dec!(3), dec!(15.41)),
            ("OLHAL-500", "Olhal p/ parafuso 500daN", dec!(3), dec!(9.65)),
            ("BRACO-C", "Braço C", dec!(1), dec!(158.72)),
            ("ISOL-PINO-POLIM", "Isolador de pino polimérico rosca 25mm", dec!(3), dec!(32.30)),
            ("PINO-ISOL", "Pino isolador reto curto aço", dec!(3), dec!(38.55)),
            ("SAPAT-9.5", "Sapatilha cabo 9,5mm", dec!(1), dec!(1.49)),
            ("CINTA-190", "Cinta circular 190mm", dec!(2), dec!(7.50)),
            ("PAR-FRANC-45", "Parafuso francês 45mm M16", dec!(3), dec!(9.50)),
            ("CINTA-200", "Cinta circular 200mm", dec!(2), dec!(7.80)),
        ],
    },
    StructureSeed {
        code: "CE3",
        description: "Estrutura CE3 - Rede Compacta com Ancoragem",
        voltage_class: "13.8kV",
        materials: &[
            ("ALCA-PREFORM", "Alça pré-formada estai", dec!(1), dec!(27.95)),
            ("SUP-AUX-BRACO", "Suporte auxiliar para braço C 65x65x900mm", dec!(1), dec!(30.26)),
            ("GANCHO-OLHAL", "Gancho olhal galvanizado 5.000 daN", dec!(3), dec!(19.50)),
            ("GRAM-ANCOR", "Grampo de ancoragem cunha", dec!(3), dec!(19.90)),
            ("ISOL-ANCOR", "Isolador de ancoragem tipo bastão polimérico", dec!(3), dec!(39.38)),
            ("MANIL-SAPAT", "Manilha sapatilha aço 5.000 daN", dec!(3), dec!(5.72)),
            ("BRACO-C", "Braço C", dec!(1), dec!(158.72)),
            ("SAPAT-9.5", "Sapatilha cabo 9,5mm", dec!(1), dec!(1.49)),
            ("OLHAL-5000", "Olhal para parafuso 5.000 daN", dec!(2), dec!(9.65)),
            ("CINTA-200", "Cinta circular 200mm", dec!(3), dec!(7.80)),
            ("CINTA-190", "Cinta circular 190mm", dec!(1), dec!(7.50)),
        ],
    },
    StructureSeed {
        code: "CE4",
        description: "Estrutura CE4 - Rede Compacta Dupla Ancoragem",
        voltage_class: "13.8kV",
        materials: &[
            ("ALCA-PREFORM", "Alça pré-formada estai", dec!(2), dec!(27.95)),
            ("ANEL-AMAR", "Anel de amarração elastomérico", dec!(2), dec!(15.41)),
            ("OLHAL-500", "Olhal p/ parafuso 500daN", dec!(3), dec!(9.65)),
            ("BRACO-C", "Braço C", dec!(1), dec!(158.72)),
            ("ISOL-SUSP-50KN", "Isolador suspensão polimérico 50kN 15kV", dec!(3), dec!(32.30)),
            ("PINO-ISOL-16", "Pino isol aço 16,0mm 154x38x192mm", dec!(3), dec!(38.55)),
            ("SAPAT-9.5", "Sapatilha cabo 9,5mm", dec!(2), dec!(1.49)),
            ("ISOL-ANCOR", "Isolador de ancoragem tipo bastão polimérico", dec!(6), dec!(39.38)),
            ("GRAM-ANCOR", "Grampo de ancoragem cunha", dec!(6), dec!(19.90)),
            ("MANIL-SAPAT", "Manilha sapatilha aço 5.000 daN", dec!(6), dec!(5.72)),
            ("CINTA-200", "Cinta circular 200mm", dec!(1), dec!(7.80)),
            ("CINTA-190", "Cinta circular 190mm", dec!(1), dec!(7.50)),
        ],
    },
];

pub const LOW_VOLTAGE_STRUCTURES: &[StructureSeed] = &[
    StructureSeed {
        code: "S1L / STBI",
        description: "Estrutura S1L / STBI - Baixa Tensão",
        voltage_class: "220V/380V",
        materials: &[
            ("ARM-SECUND", "Armação secundária para roldana", dec!(1), dec!(15.41)),
            ("ISOL-ROLD", "Isolador roldana 750V", dec!(1), dec!(12.83)),
            ("CINTA-240", "Cinta circular 240mm", dec!(1), dec!(9.20)),
            ("LACO-PREFORM", "Laço preformado roldana", dec!(1), dec!(18.50)),
        ],
    },
    StructureSeed {
        code: "S4L - FLABIT / FLABIDT",
        description: "Estrutura S4L - FLABIT / FLABIDT - Baixa Tensão",
        voltage_class: "220V/380V",
        materials: &[
            ("ARM-SECUND", "Armação secundária para roldana", dec!(2), dec!(15.41)),
            ("ISOL-ROLD", "Isolador roldana 750V", dec!(2), dec!(12.83)),
            ("CINTA-240", "Cinta circular 240mm", dec!(2), dec!(9.20)),
            ("ALCA-PREFORM", "Alça pré-formada estai", dec!(2), dec!(27.95)),
        ],
    },
    StructureSeed {
        code: "S1I-S3I-OP - SDBIT",
        description: "Estrutura S1I-S3I-OP - SDBIT - Baixa Tensão",
        voltage_class: "220V/380V",
        materials: &[
            ("ABRAC-PLAST", "Abraçadeira plástica", dec!(3), dec!(2.50)),
            ("ALCA-PREFORM", "Alça pré-formada estai", dec!(1), dec!(27.95)),
            ("ARM-SECUND-1", "Armação secundária 1 estribo", dec!(2), dec!(15.41)),
            ("CONECT-PERFUR", "Conector tipo perfurante", dec!(4), dec!(1.14)),
            ("ISOL-ROLD", "Isolador roldana 750V", dec!(2), dec!(12.83)),
            ("CINTA-240", "Cinta circular 240mm", dec!(3), dec!(9.20)),
        ],
    },
];

/// `(code, type, insulation, section, configuration, unit price)`
pub const CONDUCTORS: &[(&str, &str, &str, &str, &str, Decimal)] = &[
    ("CAA-2AWG-XLPE", "Alumínio", "XLPE", "CAA 2 AWG", "Simples", dec!(8.50)),
    ("CAA-1/0AWG-XLPE", "Alumínio", "XLPE", "CAA 1/0 AWG", "Simples", dec!(12.30)),
    ("CAA-4/0AWG-XLPE", "Alumínio", "XLPE", "CAA 4/0 AWG", "Simples", dec!(18.90)),
    ("CU-16MM2-XLPE", "Cobre", "XLPE", "16 mm²", "Simples", dec!(15.40)),
    ("AL-25MM2-XLPE", "Alumínio", "XLPE", "25 mm²", "Multiplexado", dec!(10.80)),
    ("AAAC-35MM2-PVC", "AAAC", "PVC", "35 mm²", "Simples", dec!(13.20)),
];

/// `(code, category, type, description, unit price)`
pub const EQUIPMENT: &[(&str, &str, &str, &str, Decimal)] = &[
    ("CH-FUS-15KV-100A", "Chave", "Fusível Polimérica", "Chave Fusível Polimérica 15kV 100A 7,1kA", dec!(297.01)),
    ("CH-FACA-15KV", "Chave", "Faca", "Chave Faca 15kV", dec!(800.00)),
    ("REL-AUTO-13.8KV", "Religador", "Automático Tipo 2", "Religador Automático Tipo 2 - 13,8 kV", dec!(86599.00)),
    ("TRANSF-3F-15KVA", "Transformador", "ET1A", "Transformador Trifásico 15 kVA", dec!(3500.00)),
    ("TRANSF-3F-30KVA", "Transformador", "ET2A", "Transformador Trifásico 30 kVA", dec!(4800.00)),
    ("TRANSF-3F-45KVA", "Transformador", "ET2A", "Transformador Trifásico 45 kVA", dec!(6200.00)),
    ("TRANSF-3F-75KVA", "Transformador", "ET3A", "Transformador Trifásico 75 kVA", dec!(8500.00)),
    ("TRANSF-3F-112.5KVA", "Transformador", "ET3A", "Transformador Trifásico 112,5 kVA", dec!(11800.00)),
    ("TRANSF-3F-150KVA", "Transformador", "ET4A", "Transformador Trifásico 150 kVA", dec!(14500.00)),
    ("TRANSF-3F-225KVA", "Transformador", "ET4A", "Transformador Trifásico 225 kVA", dec!(19800.00)),
    ("TRANSF-3F-300KVA", "Transformador", "ET4A", "Transformador Trifásico 300 kVA", dec!(24500.00)),
    ("RELE-FOTO", "Chave", "Relé Fotoelétrico", "Relé Fotoelétrico", dec!(18.42)),
];

/// `(code, category, description, unit price)`
pub const HARDWARE: &[(&str, &str, &str, Decimal)] = &[
    ("PAR-QUAD-M16-200", "Parafuso", "Parafuso Quadrada M-16 200mm", dec!(16.11)),
    ("PAR-ABAU-M16-45", "Parafuso", "Parafuso Abau Aço Carb M16x45mm", dec!(2.29)),
    ("PAR-FRANC-70-M16", "Parafuso", "Parafuso Francês 70mm M16", dec!(11.90)),
    ("BRACO-ANTIBAL-205", "Braçadeira", "Braço Rede Prot Antibal 205mm", dec!(25.78)),
    ("BRACO-L-354", "Braçadeira", "Braço Rede Prot Tipo L 354mm", dec!(62.12)),
    ("CINTA-CIRC-190", "Braçadeira", "Cinta Circular 190mm", dec!(7.50)),
    ("CINTA-CIRC-200", "Braçadeira", "Cinta Circular 200mm", dec!(7.80)),
    ("ISOL-SUSP-50KN-15KV", "Isolador", "Isolador Susp Polimérico 50kN 15kV", dec!(32.30)),
    ("ISOL-ROLD-750V", "Isolador", "Isolador Roldana Porcelana 750V", dec!(12.83)),
    ("ESPAC-LOSANG-15KV", "Acessório", "Espaçador Losangular RD Prot 15kV", dec!(27.95)),
    ("CONECT-PERFUR", "Acessório", "Conector Tipo Perfurante", dec!(1.14)),
    ("PARA-RAIO-13.8KV", "Para-raios", "Para-Raio RD - 13,8kV", dec!(7.74)),
    ("HASTE-TERRA-CU-16", "Para-raios", "Haste Terra Cobre 16x2.400mm", dec!(89.19)),
];
