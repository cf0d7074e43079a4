//! Line-oriented front end over [`commands`](crate::commands).
//!
//! One command per line, `verbo argumentos`. The form being filled in is a
//! [`Selection`] replaced wholesale after every edit.

use std::io::{BufRead, Write};

use labore_core::models::exam::ExamType;
use labore_core::national_id;
use labore_core::selection::Selection;
use labore_core::validation;

use crate::commands;
use crate::state::AppState;

const HELP: &str = "\
Formulário:
  nome <nome completo>        cpf <número>
  tipo <admissional|periodico|retorno|demissional>
  add <procedimento>          rm <procedimento>
  limpar                      obrigatorios
  reset                       mostrar
  gerar
Catálogo:
  catalogo [filtro]           novo <procedimento>
  excluir <procedimento>      renomear <antigo> => <novo>
  laudo <procedimento> <sim|nao>
  obrigatorio <procedimento>  logo <arquivo|->
Histórico:
  historico [nome ou CPF]     pessoas
  reimprimir <id>
  ajuda                       sair";

/// Run against the process's stdin and stdout until `sair` or end of input.
pub fn run(state: &mut AppState) -> eyre::Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_with(state, stdin.lock(), stdout.lock())
}

pub fn run_with<R: BufRead, W: Write>(
    state: &mut AppState,
    input: R,
    mut out: W,
) -> eyre::Result<()> {
    let mut selection = Selection::reset(state.catalog.mandatory());

    writeln!(out, "Sistema Checklist LaborePlus. Digite 'ajuda' para ver os comandos.")?;
    prompt(&mut out)?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        let (verb, arg) = match line.split_once(' ') {
            Some((verb, arg)) => (verb, arg.trim()),
            None => (line, ""),
        };

        match verb {
            "" => {}
            "sair" => break,
            "ajuda" => writeln!(out, "{HELP}")?,
            _ => selection = dispatch(state, selection, verb, arg, &mut out)?,
        }
        prompt(&mut out)?;
    }

    writeln!(out)?;
    Ok(())
}

fn prompt<W: Write>(out: &mut W) -> eyre::Result<()> {
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

fn dispatch<W: Write>(
    state: &mut AppState,
    selection: Selection,
    verb: &str,
    arg: &str,
    out: &mut W,
) -> eyre::Result<Selection> {
    let next = match verb {
        "nome" => {
            let next = selection.with_person_name(arg);
            if let Err(e) = validation::name_is_complete(&next.person_name) {
                writeln!(out, "{e}")?;
            }
            next
        }
        "cpf" => {
            let next = selection.with_national_id(arg);
            if national_id::digits(arg).len() == 11 {
                match commands::suggest_from_history(state, arg) {
                    Some(record) => {
                        writeln!(
                            out,
                            "Funcionário encontrado no histórico: {} ({}, {}). Dados preenchidos.",
                            record.person_name, record.exam_type, record.display_date
                        )?;
                        Selection::from_record(&record)
                    }
                    None => {
                        if let Err(e) = validation::national_id_is_valid(arg) {
                            writeln!(out, "{e}")?;
                        }
                        next
                    }
                }
            } else {
                next
            }
        }
        "tipo" => match parse_exam_type(arg) {
            Ok(exam_type) => selection.with_exam_type(exam_type),
            Err(e) => {
                writeln!(out, "{e}")?;
                selection
            }
        },
        "add" => {
            if state.catalog.contains(arg) {
                selection.add_procedure(arg)
            } else {
                writeln!(out, "Procedimento não está no catálogo: {arg}")?;
                selection
            }
        }
        "rm" => selection.remove_procedure(arg),
        "limpar" => selection.clear_procedures(),
        "obrigatorios" => {
            let (next, added) = selection.add_mandatory(state.catalog.mandatory());
            if added.is_empty() {
                writeln!(out, "Todos os procedimentos obrigatórios já estão selecionados.")?;
            } else {
                writeln!(out, "Adicionados: {}", added.join(", "))?;
            }
            next
        }
        "reset" => Selection::reset(state.catalog.mandatory()),
        "mostrar" => {
            show_selection(state, &selection, out)?;
            selection
        }
        "gerar" => match commands::generate_checklist(state, &selection) {
            Ok(generated) => {
                writeln!(
                    out,
                    "Checklist {} gerado: {}",
                    generated.id,
                    generated.path.display()
                )?;
                commands::open_document(&generated.path);
                Selection::reset(state.catalog.mandatory())
            }
            Err(message) => {
                writeln!(out, "{message}")?;
                selection
            }
        },
        _ => {
            catalog_or_history(state, verb, arg, out)?;
            selection
        }
    };
    Ok(next)
}

fn catalog_or_history<W: Write>(
    state: &mut AppState,
    verb: &str,
    arg: &str,
    out: &mut W,
) -> eyre::Result<()> {
    let result: Result<Option<String>, String> = match verb {
        "catalogo" => {
            for definition in commands::list_procedures(state, arg) {
                let mut flags = Vec::new();
                if state.catalog.is_mandatory(&definition.name) {
                    flags.push("obrigatório");
                }
                if definition.requires_report {
                    flags.push("laudo");
                }
                if flags.is_empty() {
                    writeln!(out, "  {}", definition.name)?;
                } else {
                    writeln!(out, "  {} [{}]", definition.name, flags.join(", "))?;
                }
            }
            Ok(None)
        }
        "novo" => {
            commands::add_procedure(state, arg).map(|()| Some(format!("Adicionado: {arg}")))
        }
        "excluir" => {
            commands::remove_procedure(state, arg).map(|()| Some(format!("Removido: {arg}")))
        }
        "renomear" => match arg.split_once("=>") {
            Some((old, new)) => commands::rename_procedure(state, old.trim(), new.trim())
                .map(|()| Some(format!("Renomeado para {}", new.trim()))),
            None => Err("Use: renomear <antigo> => <novo>".to_string()),
        },
        "laudo" => match arg.rsplit_once(' ') {
            Some((name, "sim")) => {
                commands::set_requires_report(state, name.trim(), true).map(|()| None)
            }
            Some((name, "nao" | "não")) => {
                commands::set_requires_report(state, name.trim(), false).map(|()| None)
            }
            _ => Err("Use: laudo <procedimento> <sim|nao>".to_string()),
        },
        "obrigatorio" => commands::toggle_mandatory(state, arg).map(|now| {
            let status = if now { "agora é obrigatório" } else { "não é mais obrigatório" };
            Some(format!("{arg} {status}"))
        }),
        "logo" => {
            let path = if arg == "-" { None } else { Some(arg) };
            commands::set_logo_paths(state, path, path).map(|()| None)
        }
        "historico" => {
            let records = commands::search_history(state, arg);
            if records.is_empty() {
                writeln!(out, "Nenhum checklist encontrado.")?;
            }
            for record in records {
                writeln!(
                    out,
                    "  #{} {} | {} | {} | {} | {} procedimento(s)",
                    record.id,
                    record.display_date,
                    record.person_name,
                    record.national_id,
                    record.exam_type,
                    record.procedures.len()
                )?;
            }
            Ok(None)
        }
        "pessoas" => {
            for person in commands::list_people(state) {
                writeln!(
                    out,
                    "  {} | {} | último: {} em {} | {} checklist(s)",
                    person.person_name,
                    person.national_id,
                    person.last_exam_type,
                    person.last_display_date,
                    person.total_checklists
                )?;
            }
            Ok(None)
        }
        "reimprimir" => match arg.parse::<u64>() {
            Ok(id) => commands::reprint(state, id)
                .map(|path| Some(format!("Abrindo {}", path.display()))),
            Err(_) => Err("Use: reimprimir <id>".to_string()),
        },
        _ => Err(format!("Comando desconhecido: {verb}. Digite 'ajuda'.")),
    };

    match result {
        Ok(Some(message)) | Err(message) => writeln!(out, "{message}")?,
        Ok(None) => {}
    }
    Ok(())
}

/// Accepts the labels plus the short "retorno".
fn parse_exam_type(arg: &str) -> Result<ExamType, String> {
    if arg.eq_ignore_ascii_case("retorno") {
        return Ok(ExamType::ReturnToWork);
    }
    arg.parse::<ExamType>()
        .map_err(|_| format!("Tipo de exame desconhecido: {arg}"))
}

fn show_selection<W: Write>(
    state: &AppState,
    selection: &Selection,
    out: &mut W,
) -> eyre::Result<()> {
    writeln!(out, "Funcionário: {}", selection.person_name)?;
    writeln!(out, "CPF: {}", selection.national_id)?;
    writeln!(out, "Tipo de Exame: {}", selection.exam_type)?;
    writeln!(out, "Procedimentos:")?;
    for (i, name) in selection.procedures.iter().enumerate() {
        let marker = if state.catalog.is_mandatory(name) { " *" } else { "" };
        writeln!(out, "  {}. {name}{marker}", i + 1)?;
    }
    Ok(())
}
