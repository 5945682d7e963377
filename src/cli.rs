use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "monkey-lab")]
#[command(about = "원숭이 종 판별 데모 & 관찰 기록장", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 写真1枚の種を判別（模擬結果）
    Classify {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,

        /// 乱数シード（結果を再現したいとき）
        #[arg(long)]
        seed: Option<u64>,

        /// 模擬推論の待ち時間（ミリ秒）
        #[arg(long)]
        latency_ms: Option<u64>,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 対話式の観察記録帳（終了すると記録は消える）
    Logbook,

    /// 判別対象の種と撮影ガイドを表示
    Species,

    /// 設定の表示・変更
    Config {
        /// 模擬推論の待ち時間（ミリ秒）を設定
        #[arg(long)]
        set_latency_ms: Option<u64>,

        /// プレビュー用一時ファイルの置き場所を設定
        #[arg(long)]
        set_preview_dir: Option<PathBuf>,

        /// 既定の乱数シードを設定
        #[arg(long)]
        set_seed: Option<u64>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}
