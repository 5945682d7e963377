//! 判別対象の種ラベルと撮影ガイド

/// 判別ラベル（固定5種）
pub const SPECIES: [&str; 5] = [
    "바바리마카크 (Barbary macaque)",
    "긴꼬리원숭이 (Long-tailed macaque)",
    "금빛털원숭이 (Golden snub-nosed)",
    "침팬지 (Chimpanzee)",
    "고릴라 (Gorilla)",
];

/// 結果欄に出す撮影ガイド
pub const GUIDANCE: [&str; 3] = [
    "정면에 가까운 사진일수록 좋아요.",
    "배경이 단순하면 정확도가 올라가요.",
    "이미지는 5MB 이하 권장.",
];
