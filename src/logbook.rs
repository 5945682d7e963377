//! 対話式の観察記録帳
//!
//! 記録はセッション中のメモリにだけ持ち、終了すると消える。

use crate::error::{LabError, Result};
use crate::preview::{TempPreview, TempPreviews};
use crate::scanner::{self, LocalDataUri, LocalImage};
use dialoguer::{Input, Select};
use monkey_lab_common::{Logbook, ObservationDetail, ObservationRecord};
use std::path::Path;

pub type LocalLogbook = Logbook<LocalImage, TempPreview>;

/// フォームに入力する内容
#[derive(Debug, Clone, Default)]
pub struct ObservationInput {
    pub species: String,
    pub observed_at: String,
    pub memo: String,
}

/// メニュー項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Add,
    Browse,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 3] = [MenuAction::Add, MenuAction::Browse, MenuAction::Quit];

    fn label(&self) -> &'static str {
        match self {
            MenuAction::Add => "새 관찰 기록",
            MenuAction::Browse => "기록 목록 보기",
            MenuAction::Quit => "종료",
        }
    }
}

/// 画像を選んでフォームを埋め、保存まで行う
///
/// 毎回その回に指定された画像だけを使う。前回失敗した分の画像は持ち越さない。
pub async fn add_observation(
    book: &mut LocalLogbook,
    previews: &TempPreviews,
    image_path: Option<&Path>,
    input: &ObservationInput,
) -> Result<u64> {
    book.clear_file();
    if let Some(path) = image_path {
        let picked = scanner::load_image(path)?;
        book.select_file(Some(picked), previews)?;
    }

    book.set_species(input.species.as_str());
    book.set_observed_at(input.observed_at.as_str());
    book.set_memo(input.memo.as_str());

    let id = book.save(&LocalDataUri).await?;
    Ok(id)
}

/// 一覧の1行
pub fn format_record_line(record: &ObservationRecord) -> String {
    format!("#{} {} ({})", record.id(), record.species(), record.observed_at())
}

/// 詳細表示の各行。メモが空なら出さない
pub fn format_detail(detail: &ObservationDetail<'_>) -> Vec<String> {
    let mut lines = vec![
        format!("종: {}", detail.species),
        format!("관찰 날짜: {}", detail.observed_at),
    ];
    if let Some(memo) = detail.memo {
        lines.push(format!("메모: {}", memo));
    }
    lines.push(format!("이미지: {}", abbreviate(detail.image_url, 48)));
    lines
}

fn abbreviate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{}… ({} bytes)", head, text.len())
}

/// 今日の日付（YYYY-MM-DD）
pub fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// 対話ループ
pub async fn run_interactive_logbook(previews: &TempPreviews) -> Result<()> {
    let mut book = LocalLogbook::new();

    println!("📒 관찰 기록장 (종료하면 기록은 사라져요)");
    println!("---\n");

    loop {
        match prompt_menu()? {
            MenuAction::Add => {
                let (path, input) = prompt_observation()?;
                match add_observation(&mut book, previews, path.as_deref(), &input).await {
                    Ok(id) => println!("✔ 저장했어요 (#{})\n", id),
                    Err(err) => println!("✖ {}\n", err),
                }
            }
            MenuAction::Browse => browse(&mut book)?,
            MenuAction::Quit => break,
        }
    }

    book.teardown();
    println!("기록 {}건을 닫았어요.", book.records().len());
    Ok(())
}

fn prompt_menu() -> Result<MenuAction> {
    let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
    let index = Select::new()
        .with_prompt("메뉴")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| LabError::Prompt(e.to_string()))?;
    Ok(MenuAction::ALL[index])
}

fn prompt_observation() -> Result<(Option<std::path::PathBuf>, ObservationInput)> {
    let path: String = prompt_text("사진 파일 경로", None)?;
    let path = (!path.trim().is_empty()).then(|| std::path::PathBuf::from(path.trim()));

    // 撮影日がEXIFから取れればそれを既定値にする
    let default_date = path
        .as_deref()
        .and_then(|p| scanner::load_image(p).ok())
        .and_then(|img| img.date)
        .unwrap_or_else(today);

    let species = prompt_text("종 이름", None)?;
    let observed_at = prompt_text("관찰 날짜", Some(default_date))?;
    let memo = prompt_text("메모 (선택)", None)?;

    Ok((path, ObservationInput { species, observed_at, memo }))
}

fn prompt_text(prompt: &str, default: Option<String>) -> Result<String> {
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
    if let Some(default) = default {
        input = input.default(default);
    }
    input
        .interact_text()
        .map_err(|e| LabError::Prompt(e.to_string()))
}

fn browse(book: &mut LocalLogbook) -> Result<()> {
    if book.records().is_empty() {
        println!("아직 기록이 없어요.\n");
        return Ok(());
    }

    let lines: Vec<String> = book.records().iter().map(format_record_line).collect();
    let default = book
        .selected()
        .and_then(|s| book.records().iter().position(|r| r.id() == s.id()))
        .unwrap_or(0);
    let index = Select::new()
        .with_prompt("기록 선택")
        .items(&lines)
        .default(default)
        .interact()
        .map_err(|e| LabError::Prompt(e.to_string()))?;

    let id = book.records()[index].id();
    book.select(id);
    if let Some(detail) = book.detail() {
        println!("---");
        for line in format_detail(&detail) {
            println!("  {}", line);
        }
        println!("---\n");
    }
    Ok(())
}
